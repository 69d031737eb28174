//! Report routes.

use axum::{
    Router,
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;
use tracing::info;

use finoffice_core::reports::{ReportError, ReportSheet};
use finoffice_db::ReportRepository;
use finoffice_shared::types::FiscalYearId;

use crate::{AppState, error::ApiResult, middleware::AuthUser};

/// Creates the report routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/reports/budget-statement", get(get_budget_statement))
}

/// Query parameters for the budget statement.
#[derive(Debug, Default, Deserialize)]
pub struct StatementQuery {
    /// Fiscal year; defaults to the current one.
    pub fiscal_year_id: Option<FiscalYearId>,
    /// Use `#,##0.00` display for amounts instead of plain numbers.
    #[serde(default)]
    pub formatted: bool,
}

/// Writes the sheet as CSV: title, the three header rows, then data rows.
///
/// Merged header cells carry their text in the first column of the span.
pub fn render_csv(sheet: &ReportSheet, formatted: bool) -> Result<Vec<u8>, ReportError> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(false)
        .from_writer(Vec::new());

    for row in sheet.header_grid() {
        writer
            .write_record(&row)
            .map_err(|e| ReportError::Render(e.to_string()))?;
    }
    for row in &sheet.rows {
        writer
            .write_record(row.iter().map(|cell| cell.render(formatted)))
            .map_err(|e| ReportError::Render(e.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|e| ReportError::Render(e.to_string()))
}

fn file_name(fiscal_year_name: &str) -> String {
    let safe: String = fiscal_year_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    format!("budget-statement-{safe}.csv")
}

/// GET `/reports/budget-statement?fiscal_year_id=&formatted=` - CSV download.
async fn get_budget_statement(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<StatementQuery>,
) -> ApiResult<impl IntoResponse> {
    let (year, sheet) = ReportRepository::new((*state.db).clone())
        .budget_statement(&state.report.office_name, query.fiscal_year_id)
        .await?;

    let body = render_csv(&sheet, query.formatted)?;
    info!(fiscal_year = %year.name, rows = sheet.rows.len(), bytes = body.len(), "Budget statement exported");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name(&year.name)),
            ),
        ],
        body,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use finoffice_core::budget::{BudgetEntry, BudgetInputs, BudgetTotals};
    use finoffice_core::reports::{COLUMN_COUNT, ReportService, StatementSource};
    use finoffice_shared::types::{BudgetEntryId, ObjectCodeId};
    use rust_decimal_macros::dec;

    fn entry() -> BudgetEntry {
        let inputs = BudgetInputs {
            first_release: dec!(1000),
            aaa_expenditure: dec!(250.5),
            ..Default::default()
        };
        BudgetEntry {
            id: BudgetEntryId::new(),
            object_code_id: ObjectCodeId::new(),
            fiscal_year_id: FiscalYearId::new(),
            totals: BudgetTotals::from_inputs(&inputs),
            inputs,
            version: 1,
            created_by: None,
            updated_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn sheet() -> ReportSheet {
        let sources = vec![
            StatementSource {
                object_code: "A01101".into(),
                head_of_account: "Basic Pay, Officers".into(),
                entry: Some(entry()),
            },
            StatementSource {
                object_code: "A03201".into(),
                head_of_account: "Postage".into(),
                entry: None,
            },
        ];
        ReportService::budget_statement("Finance Office", "2025-26", &sources)
    }

    fn records(bytes: &[u8]) -> Vec<csv::StringRecord> {
        csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(bytes)
            .records()
            .map(Result::unwrap)
            .collect()
    }

    #[test]
    fn test_csv_shape() {
        let sheet = sheet();
        let records = records(&render_csv(&sheet, false).unwrap());

        assert_eq!(records.len(), sheet.header_row_count() + 2);
        assert!(records.iter().all(|r| r.len() == COLUMN_COUNT));
        assert!(records[0][0].contains("2025-26"));
    }

    #[test]
    fn test_csv_quotes_commas_and_fills_placeholders() {
        let sheet = sheet();
        let records = records(&render_csv(&sheet, false).unwrap());
        let header_rows = sheet.header_row_count();

        let with_entry = &records[header_rows];
        assert_eq!(&with_entry[2], "Basic Pay, Officers");

        let without_entry = &records[header_rows + 1];
        assert_eq!(&without_entry[1], "A03201");
        assert!(without_entry.iter().skip(3).all(|c| c == "-"));
    }

    #[test]
    fn test_formatted_amounts() {
        let sheet = sheet();
        let plain = records(&render_csv(&sheet, false).unwrap());
        let formatted = records(&render_csv(&sheet, true).unwrap());
        let row = sheet.header_row_count();

        assert!(plain[row].iter().any(|c| c == "1000.00"));
        assert!(formatted[row].iter().any(|c| c == "1,000.00"));
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name("2025-26"), "budget-statement-2025-26.csv");
        assert_eq!(file_name("FY 2025/26"), "budget-statement-FY_2025_26.csv");
    }
}
