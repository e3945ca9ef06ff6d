//! Rounding and comparison helpers shared by the fee, duty and repayment
//! calculators.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to whole currency units, half away from zero.
///
/// Fees, VAT-inclusive amounts and transfer duty are all quoted in whole rand.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use conveyance_core::calculations::common::round_whole;
///
/// assert_eq!(round_whole(dec!(52750.49)), dec!(52750));
/// assert_eq!(round_whole(dec!(52750.50)), dec!(52751));
/// assert_eq!(round_whole(dec!(-2.5)), dec!(-3)); // Away from zero
/// ```
pub fn round_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded up to 0.01 (away from zero). Used for
/// repayment figures, which are quoted in cents.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use conveyance_core::calculations::common::round_cents;
///
/// assert_eq!(round_cents(dec!(59902.7932)), dec!(59902.79));
/// assert_eq!(round_cents(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_cents(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the maximum of two decimal values.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use conveyance_core::calculations::common::max;
///
/// assert_eq!(max(dec!(100.00), dec!(200.00)), dec!(200.00));
/// assert_eq!(max(dec!(-100.00), dec!(-200.00)), dec!(-100.00));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}
