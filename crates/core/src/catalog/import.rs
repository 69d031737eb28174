//! Best-effort parser for pasted object code lists.
//!
//! Accepts one code per line followed by its head of account, separated by a
//! tab, whitespace, ` - ` or `:`. Lines that cannot be read are reported, not
//! fatal.

use std::collections::HashMap;

use super::service::CatalogService;
use super::types::{ImportIssue, ImportReport, ImportRow};

/// Parses bulk import text into rows and issues.
#[must_use]
pub fn parse_import(text: &str) -> ImportReport {
    let mut report = ImportReport::default();
    let mut first_seen: HashMap<String, usize> = HashMap::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }

        let (code, head) = split_line(trimmed);

        if !code.chars().any(|c| c.is_ascii_digit()) {
            report.issues.push(issue(line, format!("no object code found in '{trimmed}'")));
            continue;
        }
        let code = match CatalogService::validate_code(code) {
            Ok(code) => code,
            Err(err) => {
                report.issues.push(issue(line, err.to_string()));
                continue;
            }
        };
        if head.is_empty() {
            report.issues.push(issue(line, format!("missing head of account for {code}")));
            continue;
        }

        let key = code.to_uppercase();
        if let Some(first) = first_seen.get(&key) {
            report
                .issues
                .push(issue(line, format!("duplicate code {code} (first on line {first})")));
            continue;
        }
        first_seen.insert(key, line);

        report.rows.push(ImportRow {
            line,
            code,
            head_of_account: head.to_string(),
        });
    }

    report
}

fn split_line(line: &str) -> (&str, &str) {
    let (code, rest) = match line.split_once('\t') {
        Some((code, rest)) => (code.trim(), rest),
        None => line
            .split_once(char::is_whitespace)
            .unwrap_or((line, "")),
    };

    let code = code.trim_end_matches([':', '-']);
    let head = rest
        .trim()
        .trim_start_matches(['-', ':'])
        .trim();
    (code, head)
}

fn issue(line: usize, reason: String) -> ImportIssue {
    ImportIssue { line, reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("A01101 Basic Pay of Officers", "A01101", "Basic Pay of Officers")]
    #[case("A01101\tBasic Pay of Officers", "A01101", "Basic Pay of Officers")]
    #[case("A01101 - Basic Pay - Officers", "A01101", "Basic Pay - Officers")]
    #[case("A01101: Basic Pay", "A01101", "Basic Pay")]
    #[case("  A03970     Others  ", "A03970", "Others")]
    fn test_accepted_lines(#[case] text: &str, #[case] code: &str, #[case] head: &str) {
        let report = parse_import(text);
        assert!(report.issues.is_empty(), "{:?}", report.issues);
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].code, code);
        assert_eq!(report.rows[0].head_of_account, head);
    }

    #[test]
    fn test_mixed_input() {
        let text = "\
A01101 Basic Pay

Heading without code
A01151\t
A01101 Basic Pay again
A012-1 - Allowances
";
        let report = parse_import(text);

        let codes: Vec<_> = report.rows.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["A01101", "A012-1"]);
        assert_eq!(report.rows[1].line, 6);

        let lines: Vec<_> = report.issues.iter().map(|i| i.line).collect();
        assert_eq!(lines, vec![3, 4, 5]);
        assert!(report.issues[2].reason.contains("first on line 1"));
    }

    #[test]
    fn test_overlong_code_reported() {
        let report = parse_import("A0110100000000000000099 Too long");
        assert!(report.rows.is_empty());
        assert_eq!(report.issues.len(), 1);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_import(""), ImportReport::default());
    }
}
