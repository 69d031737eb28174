//! Fiscal year management.

pub mod error;
pub mod service;
pub mod year;

pub use error::FiscalError;
pub use service::{FiscalService, MAX_FISCAL_YEAR_NAME_LEN};
pub use year::{CreateFiscalYearInput, CurrentSwitch, FiscalYear};
