//! Cleaning of user-entered rand amounts.
//!
//! The calculators only ever see a [`Decimal`]; anything that cannot become
//! one (garbage text, `NaN`, infinities) is turned into `None` here.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use tracing::warn;

/// Whitespace (including non-breaking spaces) and thousands separators.
static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s,]+").expect("separator pattern is valid"));

/// Removes an optional leading currency symbol, spaces and `,` separators.
fn normalize_amount_input(s: &str) -> String {
    let compact = SEPARATORS.replace_all(s, "");
    compact
        .strip_prefix(['R', 'r'])
        .unwrap_or(compact.as_ref())
        .to_string()
}

/// Parses an amount such as `"R 1 250 000"` or `"1,250,000.50"`.
///
/// Returns `None` for empty input, and logs a warning before returning
/// `None` for input that is not a number.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use conveyance_data::amount::parse_amount;
///
/// assert_eq!(parse_amount("R1,250,000"), Some(dec!(1250000)));
/// assert_eq!(parse_amount("  "), None);
/// ```
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let normalized = normalize_amount_input(s);
    if normalized.is_empty() {
        return None;
    }

    normalized.parse().map_or_else(
        |e| {
            warn!(input = %s, "invalid amount: {}", e);
            None
        },
        Some,
    )
}

/// Converts a float to a [`Decimal`], rejecting `NaN` and infinities.
pub fn amount_from_f64(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        warn!(value, "non-finite amount");
        return None;
    }
    Decimal::from_f64(value)
}
