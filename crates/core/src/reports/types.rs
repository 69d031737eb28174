//! Report data types.

use finoffice_shared::types::{format_amount, round_money};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::budget::BudgetEntry;

/// An active object code and its entry for the reported year, if any.
#[derive(Debug, Clone)]
pub struct StatementSource {
    /// Object code.
    pub object_code: String,
    /// Head of account.
    pub head_of_account: String,
    /// Budget entry for the year.
    pub entry: Option<BudgetEntry>,
}

/// A single sheet cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Cell {
    /// Free text.
    Text(String),
    /// Amount or percentage.
    Number(Decimal),
    /// No entry exists for the row.
    Placeholder,
}

impl Cell {
    /// Rendered text.
    ///
    /// With `formatted` numbers use the sheet's `#,##0.00` display,
    /// otherwise plain two-decimal text.
    #[must_use]
    pub fn render(&self, formatted: bool) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) if formatted => format_amount(*n),
            Self::Number(n) => format!("{:.2}", round_money(*n)),
            Self::Placeholder => PLACEHOLDER.to_string(),
        }
    }
}

/// Text shown in numeric columns of rows without an entry.
pub const PLACEHOLDER: &str = "-";

/// A header cell spanning one or more columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderCell {
    /// Header text.
    pub text: String,
    /// First column, 1-based.
    pub first_column: usize,
    /// Number of merged columns.
    pub span: usize,
}

/// In-memory budget statement, ready for CSV or spreadsheet output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSheet {
    /// Sheet title (first header row).
    pub title: String,
    /// Header rows below the title, top to bottom.
    pub header_rows: Vec<Vec<HeaderCell>>,
    /// Data rows.
    pub rows: Vec<Vec<Cell>>,
    /// Number of columns.
    pub column_count: usize,
    /// Rows frozen at the top.
    pub freeze_rows: usize,
    /// Autofilter range in A1 notation.
    pub autofilter_range: String,
    /// Display format of numeric cells.
    pub number_format: &'static str,
}

impl ReportSheet {
    /// Header row count including the title.
    #[must_use]
    pub fn header_row_count(&self) -> usize {
        self.header_rows.len() + 1
    }

    /// Expands header rows into full-width text rows, repeating nothing in
    /// merged cells. The title is the first row.
    #[must_use]
    pub fn header_grid(&self) -> Vec<Vec<String>> {
        let mut title = vec![String::new(); self.column_count];
        if let Some(first) = title.first_mut() {
            first.clone_from(&self.title);
        }

        let mut grid = vec![title];
        for header in &self.header_rows {
            let mut row = vec![String::new(); self.column_count];
            for cell in header {
                if let Some(slot) = row.get_mut(cell.first_column.saturating_sub(1)) {
                    slot.clone_from(&cell.text);
                }
            }
            grid.push(row);
        }
        grid
    }
}
