//! Fixed-point money helpers.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are `rust_decimal::Decimal` with two fractional digits; rounding
//! happens only at display and report time.

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Number of fractional digits carried by every stored amount.
pub const MONEY_SCALE: u32 = 2;

/// Largest magnitude a `NUMERIC(18,2)` column holds: 9999999999999999.99.
pub const MAX_AMOUNT: Decimal =
    Decimal::from_parts(0xA763_FFFF, 0x0DE0_B6B3, 0, false, MONEY_SCALE);

/// Why an amount cannot be stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AmountError {
    /// Magnitude above [`MAX_AMOUNT`].
    #[error("exceeds the maximum amount of {}", MAX_AMOUNT)]
    OutOfRange,
    /// More fractional digits than [`MONEY_SCALE`].
    #[error("has more than {} decimal places", MONEY_SCALE)]
    TooPrecise,
}

/// Checks that an amount fits a stored money column.
///
/// Trailing zeros do not count toward the scale, so `1.500` passes.
///
/// # Errors
///
/// `OutOfRange` past [`MAX_AMOUNT`], `TooPrecise` past two decimals.
pub fn check_amount(amount: Decimal) -> Result<Decimal, AmountError> {
    if amount.abs() > MAX_AMOUNT {
        return Err(AmountError::OutOfRange);
    }
    if amount.normalize().scale() > MONEY_SCALE {
        return Err(AmountError::TooPrecise);
    }
    Ok(amount)
}

/// Rounds an amount to two decimals, half away from zero.
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns `part / whole * 100` rounded to two decimals.
///
/// A zero `whole` yields zero instead of dividing.
#[must_use]
pub fn percentage(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        Decimal::ZERO
    } else {
        round_money(part / whole * Decimal::ONE_HUNDRED)
    }
}

/// Formats an amount as `#,##0.00`.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    let rounded = round_money(amount);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let plain = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-{grouped}.{frac_part}")
    } else {
        format!("{grouped}.{frac_part}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(1.005), dec!(1.01))]
    #[case(dec!(-1.005), dec!(-1.01))]
    #[case(dec!(2.344), dec!(2.34))]
    #[case(dec!(10), dec!(10.00))]
    fn test_round_money(#[case] input: Decimal, #[case] expected: Decimal) {
        assert_eq!(round_money(input), expected);
    }

    #[test]
    fn test_max_amount_matches_column() {
        assert_eq!(MAX_AMOUNT, dec!(9999999999999999.99));
    }

    #[rstest]
    #[case(dec!(0))]
    #[case(dec!(1.5))]
    #[case(dec!(1.500))]
    #[case(dec!(-250.75))]
    #[case(dec!(9999999999999999.99))]
    #[case(dec!(-9999999999999999.99))]
    fn test_check_amount_accepts(#[case] amount: Decimal) {
        assert_eq!(check_amount(amount), Ok(amount));
    }

    #[rstest]
    #[case(dec!(10000000000000000), AmountError::OutOfRange)]
    #[case(dec!(-10000000000000000.00), AmountError::OutOfRange)]
    #[case(Decimal::MAX, AmountError::OutOfRange)]
    #[case(dec!(0.005), AmountError::TooPrecise)]
    #[case(dec!(-1.001), AmountError::TooPrecise)]
    fn test_check_amount_rejects(#[case] amount: Decimal, #[case] expected: AmountError) {
        assert_eq!(check_amount(amount), Err(expected));
    }

    #[test]
    fn test_percentage_zero_whole() {
        assert_eq!(percentage(dec!(500), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_percentage_over_hundred() {
        assert_eq!(percentage(dec!(150), dec!(100)), dec!(150.00));
        assert_eq!(percentage(dec!(1), dec!(3)), dec!(33.33));
    }

    #[rstest]
    #[case(dec!(0), "0.00")]
    #[case(dec!(12.5), "12.50")]
    #[case(dec!(999.999), "1,000.00")]
    #[case(dec!(1234567.891), "1,234,567.89")]
    #[case(dec!(-45000), "-45,000.00")]
    #[case(dec!(-0.001), "0.00")]
    fn test_format_amount(#[case] input: Decimal, #[case] expected: &str) {
        assert_eq!(format_amount(input), expected);
    }
}
