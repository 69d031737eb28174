//! Budget statement layout.

use finoffice_shared::types::percentage;
use rust_decimal::Decimal;

use super::types::{Cell, HeaderCell, ReportSheet, StatementSource};
use crate::budget::BudgetEntry;

/// Identification columns: serial, code, head of account.
const ID_COLUMNS: [&str; 3] = ["S.No", "Object Code", "Head of Account"];

const AAA_COLUMNS: [&str; 17] = [
    "Total Allocation",
    "1st Release",
    "2nd Release",
    "3rd Release",
    "4th Release",
    "Supplementary Budget",
    "Sum of Released",
    "Additional Surrender",
    "Excess Reallocation",
    "Re-Appropriation",
    "Total AAA Budget",
    "Budget Withheld/Lapse",
    "Expenditure",
    "Remaining",
    "Development Allocated",
    "Development Expenditure",
    "Development Remaining",
];

const SPECIAL_ACCOUNT_COLUMNS: [&str; 6] = [
    "Allocated",
    "Re-Appropriation",
    "Total",
    "Expenditure",
    "Remaining",
    "Utilization %",
];

const CONSOLIDATED_COLUMNS: [&str; 3] = ["Total Budget", "Total Expenditure", "Remaining"];

/// Total number of columns.
pub const COLUMN_COUNT: usize = ID_COLUMNS.len()
    + AAA_COLUMNS.len()
    + 2 * SPECIAL_ACCOUNT_COLUMNS.len()
    + CONSOLIDATED_COLUMNS.len();

/// Number of numeric columns.
pub const NUMERIC_COLUMN_COUNT: usize = COLUMN_COUNT - ID_COLUMNS.len();

/// Display format of numeric cells.
pub const NUMBER_FORMAT: &str = "#,##0.00";

/// Service for building the budget statement.
pub struct ReportService;

impl ReportService {
    /// Builds the statement for one fiscal year.
    ///
    /// `sources` are the active object codes in code order; codes without an
    /// entry get `-` in every numeric column.
    #[must_use]
    pub fn budget_statement(
        office_name: &str,
        fiscal_year_name: &str,
        sources: &[StatementSource],
    ) -> ReportSheet {
        let header_rows = Self::header_rows();
        let header_row_count = header_rows.len() + 1;

        let rows: Vec<Vec<Cell>> = sources
            .iter()
            .enumerate()
            .map(|(i, source)| Self::row(i + 1, source))
            .collect();

        let last_row = header_row_count + rows.len();
        let autofilter_range = format!(
            "A{header_row_count}:{}{last_row}",
            column_letter(COLUMN_COUNT)
        );

        ReportSheet {
            title: format!("{office_name} - Budget Statement {fiscal_year_name}"),
            header_rows,
            rows,
            column_count: COLUMN_COUNT,
            freeze_rows: header_row_count,
            autofilter_range,
            number_format: NUMBER_FORMAT,
        }
    }

    fn header_rows() -> Vec<Vec<HeaderCell>> {
        let aaa_start = ID_COLUMNS.len() + 1;
        let pla_start = aaa_start + AAA_COLUMNS.len();
        let uhi_start = pla_start + SPECIAL_ACCOUNT_COLUMNS.len();
        let consolidated_start = uhi_start + SPECIAL_ACCOUNT_COLUMNS.len();

        let groups = vec![
            span("Object Code Details", 1, ID_COLUMNS.len()),
            span("Non-Development (AAA)", aaa_start, AAA_COLUMNS.len()),
            span("PLA", pla_start, SPECIAL_ACCOUNT_COLUMNS.len()),
            span("UHI", uhi_start, SPECIAL_ACCOUNT_COLUMNS.len()),
            span("Consolidated", consolidated_start, CONSOLIDATED_COLUMNS.len()),
        ];

        let subheader = vec![span(
            "AAA + Development + PLA + UHI",
            consolidated_start,
            CONSOLIDATED_COLUMNS.len(),
        )];

        let columns = ID_COLUMNS
            .iter()
            .chain(AAA_COLUMNS.iter())
            .chain(SPECIAL_ACCOUNT_COLUMNS.iter())
            .chain(SPECIAL_ACCOUNT_COLUMNS.iter())
            .chain(CONSOLIDATED_COLUMNS.iter())
            .enumerate()
            .map(|(i, text)| span(text, i + 1, 1))
            .collect();

        vec![groups, subheader, columns]
    }

    fn row(serial: usize, source: &StatementSource) -> Vec<Cell> {
        let mut cells = Vec::with_capacity(COLUMN_COUNT);
        cells.push(Cell::Text(serial.to_string()));
        cells.push(Cell::Text(source.object_code.clone()));
        cells.push(Cell::Text(source.head_of_account.clone()));

        match &source.entry {
            Some(entry) => cells.extend(Self::numbers(entry).into_iter().map(Cell::Number)),
            None => cells.extend(std::iter::repeat_n(Cell::Placeholder, NUMERIC_COLUMN_COUNT)),
        }
        cells
    }

    /// Numeric columns of one entry, in column order.
    #[must_use]
    pub fn numbers(entry: &BudgetEntry) -> Vec<Decimal> {
        let i = &entry.inputs;
        let t = &entry.totals;
        vec![
            i.aaa_total_allocation,
            i.first_release,
            i.second_release,
            i.third_release,
            i.fourth_release,
            i.supplementary_budget,
            t.sum_of_released,
            i.additional_surrender,
            i.excess_reallocation,
            i.aaa_re_app,
            t.total_aaa_budget,
            i.budget_withheld_lapse,
            i.aaa_expenditure,
            t.aaa_remaining,
            i.development_allocated,
            i.development_expenditure,
            t.development_remaining,
            i.pla_allocated,
            i.pla_re_app,
            t.pla_total,
            i.pla_expenditure,
            t.pla_remaining,
            percentage(i.pla_expenditure, t.pla_total),
            i.uhi_allocated,
            i.uhi_re_app,
            t.uhi_total,
            i.uhi_expenditure,
            t.uhi_remaining,
            percentage(i.uhi_expenditure, t.uhi_total),
            t.consolidated_total_budget,
            t.consolidated_total_expenditure,
            t.consolidated_remaining,
        ]
    }
}

fn span(text: &str, first_column: usize, span: usize) -> HeaderCell {
    HeaderCell {
        text: text.to_string(),
        first_column,
        span,
    }
}

/// Spreadsheet column letter for a 1-based index (1 = A, 27 = AA).
#[must_use]
pub fn column_letter(mut index: usize) -> String {
    let mut letters = Vec::new();
    while index > 0 {
        let rem = u8::try_from((index - 1) % 26).unwrap_or_default();
        letters.push(char::from(b'A' + rem));
        index = (index - 1) / 26;
    }
    letters.iter().rev().collect()
}
