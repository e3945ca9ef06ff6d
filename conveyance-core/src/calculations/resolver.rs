//! Ordered band lookup shared by tiers, fixed bands and duty brackets.
//!
//! Rules are tried in the order given and the first one whose bounds admit
//! the amount wins. The list is never re-sorted: tables must be ascending by
//! upper bound with any unbounded catch-all last. The loader validates this
//! when a table is decoded.

use rust_decimal::Decimal;

use crate::models::{Bracket, FixedBand, Tier};

/// A rule that applies to a contiguous amount range.
///
/// The lower bound is exclusive and the upper bound inclusive, so adjacent
/// bands written as `(a, b]`, `(b, c]` leave no gap between them. A missing
/// bound leaves that side open.
pub trait Banded<A> {
    fn upper_bound(&self) -> Option<A>;

    fn lower_bound(&self) -> Option<A> {
        None
    }
}

/// Returns the first rule whose bounds admit `amount`, or `None`.
///
/// Comparisons use [`PartialOrd`], so an unordered amount (a floating point
/// `NaN`) fails every bounded comparison but still matches a rule that has
/// neither bound.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use conveyance_core::calculations::resolver::resolve;
/// use conveyance_core::Tier;
///
/// let tiers = vec![
///     Tier { upper_bound: Some(dec!(2000000)), rate: dec!(0.009), minimum_fee: None },
///     Tier { upper_bound: None, rate: dec!(0.008), minimum_fee: None },
/// ];
///
/// assert_eq!(resolve(dec!(1000000), &tiers).map(|t| t.rate), Some(dec!(0.009)));
/// assert_eq!(resolve(dec!(5000000), &tiers).map(|t| t.rate), Some(dec!(0.008)));
/// ```
pub fn resolve<A, R>(
    amount: A,
    rules: &[R],
) -> Option<&R>
where
    A: PartialOrd + Copy,
    R: Banded<A>,
{
    rules.iter().find(|rule| admits(amount, *rule))
}

fn admits<A, R>(
    amount: A,
    rule: &R,
) -> bool
where
    A: PartialOrd + Copy,
    R: Banded<A>,
{
    rule.lower_bound().is_none_or(|lower| amount > lower)
        && rule.upper_bound().is_none_or(|upper| amount <= upper)
}

impl Banded<Decimal> for Tier {
    fn upper_bound(&self) -> Option<Decimal> {
        self.upper_bound
    }
}

impl Banded<Decimal> for FixedBand {
    fn upper_bound(&self) -> Option<Decimal> {
        self.upper_bound
    }

    fn lower_bound(&self) -> Option<Decimal> {
        self.lower_bound
    }
}

impl Banded<Decimal> for Bracket {
    fn upper_bound(&self) -> Option<Decimal> {
        self.upper_bound
    }
}
