//! Fiscal year types.

use chrono::{DateTime, NaiveDate, Utc};
use finoffice_shared::types::FiscalYearId;
use serde::{Deserialize, Serialize};

/// Fiscal year definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiscalYear {
    /// Unique identifier.
    pub id: FiscalYearId,
    /// Year name (e.g., "2024-25").
    pub name: String,
    /// Start date of the fiscal year.
    pub start_date: NaiveDate,
    /// End date of the fiscal year.
    pub end_date: NaiveDate,
    /// False once soft-deleted.
    pub is_active: bool,
    /// At most one year carries this flag.
    pub is_current: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl FiscalYear {
    /// Returns true if the given date falls within this year.
    #[must_use]
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}

/// Input for creating a fiscal year.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFiscalYearInput {
    /// Year name.
    pub name: String,
    /// Start date.
    pub start_date: NaiveDate,
    /// End date; must be after the start date.
    pub end_date: NaiveDate,
}

/// Flag changes needed to make one year current.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentSwitch {
    /// Year that becomes current.
    pub set: FiscalYearId,
    /// Years whose current flag is cleared.
    pub clear: Vec<FiscalYearId>,
}
