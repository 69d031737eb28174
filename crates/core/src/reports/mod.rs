//! Budget statement export.
//!
//! Fixed 35-column layout: identification, AAA (with development figures),
//! PLA, UHI and consolidated groups under a four-row header.

pub mod error;
pub mod service;
pub mod types;


pub use error::ReportError;
pub use service::{COLUMN_COUNT, NUMBER_FORMAT, NUMERIC_COLUMN_COUNT, ReportService, column_letter};
pub use types::{Cell, HeaderCell, PLACEHOLDER, ReportSheet, StatementSource};
