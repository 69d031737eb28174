//! Fiscal year validation and current-year switching.

use finoffice_shared::types::FiscalYearId;

use super::error::FiscalError;
use super::year::{CreateFiscalYearInput, CurrentSwitch, FiscalYear};

/// Maximum length of a fiscal year name.
pub const MAX_FISCAL_YEAR_NAME_LEN: usize = 50;

/// Fiscal year business rules.
pub struct FiscalService;

impl FiscalService {
    /// Validates and normalises a create request.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for a blank or overlong name and
    /// `InvalidDateRange` unless `start_date < end_date`.
    pub fn validate_create(
        input: CreateFiscalYearInput,
    ) -> Result<CreateFiscalYearInput, FiscalError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(FiscalError::Validation("fiscal year name is required".into()));
        }
        if name.chars().count() > MAX_FISCAL_YEAR_NAME_LEN {
            return Err(FiscalError::Validation(format!(
                "fiscal year name exceeds {MAX_FISCAL_YEAR_NAME_LEN} characters"
            )));
        }
        if input.start_date >= input.end_date {
            return Err(FiscalError::InvalidDateRange {
                start: input.start_date,
                end: input.end_date,
            });
        }

        Ok(CreateFiscalYearInput {
            name: name.to_string(),
            ..input
        })
    }

    /// Works out which rows flip when `target` becomes current.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `target` is not in `years` and `Inactive` if it
    /// has been deactivated.
    pub fn plan_current_switch(
        years: &[FiscalYear],
        target: FiscalYearId,
    ) -> Result<CurrentSwitch, FiscalError> {
        let year = years
            .iter()
            .find(|y| y.id == target)
            .ok_or(FiscalError::NotFound(target.0))?;

        if !year.is_active {
            return Err(FiscalError::Inactive(target.0));
        }

        let clear = years
            .iter()
            .filter(|y| y.is_current && y.id != target)
            .map(|y| y.id)
            .collect();

        Ok(CurrentSwitch { set: target, clear })
    }

    /// Soft-deletes a year; a deactivated year is never current.
    #[must_use]
    pub fn deactivate(mut year: FiscalYear) -> FiscalYear {
        year.is_active = false;
        year.is_current = false;
        year
    }

    /// The current year, if any.
    #[must_use]
    pub fn current(years: &[FiscalYear]) -> Option<&FiscalYear> {
        years.iter().find(|y| y.is_current && y.is_active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn year(name: &str, is_current: bool) -> FiscalYear {
        FiscalYear {
            id: FiscalYearId::new(),
            name: name.to_string(),
            start_date: date(2024, 7, 1),
            end_date: date(2025, 6, 30),
            is_active: true,
            is_current,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_switch_flips_previous() {
        let old = year("2023-24", true);
        let new = year("2024-25", false);
        let years = vec![old.clone(), new.clone()];

        let plan = FiscalService::plan_current_switch(&years, new.id).unwrap();

        assert_eq!(plan.set, new.id);
        assert_eq!(plan.clear, vec![old.id]);
    }

    #[test]
    fn test_switch_to_already_current() {
        let only = year("2024-25", true);
        let plan = FiscalService::plan_current_switch(std::slice::from_ref(&only), only.id).unwrap();
        assert!(plan.clear.is_empty());
    }

    #[test]
    fn test_switch_unknown_target() {
        let years = vec![year("2024-25", true)];
        let result = FiscalService::plan_current_switch(&years, FiscalYearId::new());
        assert!(matches!(result, Err(FiscalError::NotFound(_))));
    }

    #[test]
    fn test_switch_inactive_target() {
        let inactive = FiscalService::deactivate(year("2022-23", true));
        assert!(!inactive.is_current);
        let id = inactive.id;
        let result = FiscalService::plan_current_switch(&[inactive], id);
        assert!(matches!(result, Err(FiscalError::Inactive(_))));
    }

    #[rstest]
    #[case("", date(2024, 7, 1), date(2025, 6, 30))]
    #[case("2024-25", date(2025, 6, 30), date(2024, 7, 1))]
    #[case("2024-25", date(2024, 7, 1), date(2024, 7, 1))]
    fn test_validate_create_rejects(
        #[case] name: &str,
        #[case] start_date: NaiveDate,
        #[case] end_date: NaiveDate,
    ) {
        let input = CreateFiscalYearInput {
            name: name.to_string(),
            start_date,
            end_date,
        };
        assert!(FiscalService::validate_create(input).is_err());
    }

    #[test]
    fn test_validate_create_trims() {
        let input = CreateFiscalYearInput {
            name: "  2024-25 ".to_string(),
            start_date: date(2024, 7, 1),
            end_date: date(2025, 6, 30),
        };
        assert_eq!(FiscalService::validate_create(input).unwrap().name, "2024-25");
    }

    #[test]
    fn test_contains_date() {
        let y = year("2024-25", false);
        assert!(y.contains_date(date(2024, 7, 1)));
        assert!(y.contains_date(date(2025, 6, 30)));
        assert!(!y.contains_date(date(2025, 7, 1)));
    }
}
