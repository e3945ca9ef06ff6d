//! Home loan repayments using the standard annuity formula.
//!
//! ```text
//! r = annual_rate_percent / 100 / 12
//! n = years * 12
//! payment = principal * r * (1 + r)^n / ((1 + r)^n - 1)
//! ```
//!
//! The monthly payment is rounded to cents and the totals are derived from
//! the rounded payment, so `total_repayment == monthly_payment * n` and
//! `total_interest == total_repayment - principal` hold exactly.
//!
//! A zero-year term, a term longer than [`MAX_TERM_YEARS`], or a rate so large
//! that `(1 + r)^n` does not fit in a [`Decimal`], yields an all-zero result
//! instead of an error.

use rust_decimal::{Decimal, MathematicalOps};
use tracing::warn;

use crate::calculations::common::round_cents;
use crate::models::{AmortizationResult, ScheduledPayment};

const MONTHS_PER_YEAR: u32 = 12;

/// Longest loan term accepted, in years.
pub const MAX_TERM_YEARS: u32 = 100;

/// Monthly payment, total repayment and total interest of a loan.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use conveyance_core::calculations::amortization::monthly_repayment;
///
/// let result = monthly_repayment(dec!(1200000), dec!(0), 10);
///
/// assert_eq!(result.monthly_payment, dec!(10000));
/// assert_eq!(result.total_interest, dec!(0));
/// ```
pub fn monthly_repayment(
    principal: Decimal,
    annual_rate_percent: Decimal,
    years: u32,
) -> AmortizationResult {
    let Some(terms) = LoanTerms::new(principal, annual_rate_percent, years) else {
        return AmortizationResult::default();
    };

    let total_repayment = terms
        .monthly_payment
        .saturating_mul(Decimal::from(terms.payment_count));

    AmortizationResult {
        monthly_payment: terms.monthly_payment,
        total_repayment,
        total_interest: total_repayment.saturating_sub(principal),
    }
}

/// Month-by-month split of each instalment into interest and principal.
///
/// Interest is charged on the opening balance at the monthly rate and rounded
/// to cents. The last instalment is adjusted so the loan closes at exactly
/// zero, which means the sum of the instalments can differ from
/// [`AmortizationResult::total_repayment`] by the accumulated rounding.
///
/// Returns an empty schedule wherever [`monthly_repayment`] returns the
/// all-zero result.
pub fn amortization_schedule(
    principal: Decimal,
    annual_rate_percent: Decimal,
    years: u32,
) -> Vec<ScheduledPayment> {
    let Some(terms) = LoanTerms::new(principal, annual_rate_percent, years) else {
        return Vec::new();
    };

    let mut payments = Vec::with_capacity(terms.payment_count as usize);
    let mut balance = principal;

    for payment_number in 1..=terms.payment_count {
        let interest = round_cents(balance.saturating_mul(terms.monthly_rate));
        let principal_portion = if payment_number == terms.payment_count {
            balance
        } else {
            terms.monthly_payment.saturating_sub(interest)
        };
        let closing_balance = balance.saturating_sub(principal_portion);

        payments.push(ScheduledPayment {
            payment_number,
            opening_balance: balance,
            payment: principal_portion.saturating_add(interest),
            interest,
            principal: principal_portion,
            closing_balance,
        });

        balance = closing_balance;
    }

    payments
}

/// Validated inputs shared by the summary and the schedule.
struct LoanTerms {
    monthly_rate: Decimal,
    payment_count: u32,
    monthly_payment: Decimal,
}

impl LoanTerms {
    fn new(
        principal: Decimal,
        annual_rate_percent: Decimal,
        years: u32,
    ) -> Option<Self> {
        if years == 0 {
            return None;
        }
        if years > MAX_TERM_YEARS {
            warn!(years, max_years = MAX_TERM_YEARS, "loan term too long; returning zero");
            return None;
        }
        let payment_count = years * MONTHS_PER_YEAR;

        let monthly_rate =
            annual_rate_percent / Decimal::ONE_HUNDRED / Decimal::from(MONTHS_PER_YEAR);

        let Some(instalment) = instalment(principal, monthly_rate, payment_count) else {
            warn!(
                %principal,
                %annual_rate_percent,
                years,
                "repayment does not fit in a decimal; returning zero"
            );
            return None;
        };

        Some(Self {
            monthly_rate,
            payment_count,
            monthly_payment: round_cents(instalment),
        })
    }
}

/// Unrounded level instalment, `None` on overflow.
fn instalment(
    principal: Decimal,
    monthly_rate: Decimal,
    payment_count: u32,
) -> Option<Decimal> {
    if monthly_rate.is_zero() {
        return principal.checked_div(Decimal::from(payment_count));
    }

    let growth = (Decimal::ONE + monthly_rate).checked_powu(u64::from(payment_count))?;
    let denominator = growth.checked_sub(Decimal::ONE)?;
    if denominator.is_zero() {
        return None;
    }

    principal
        .checked_mul(monthly_rate)?
        .checked_mul(growth)?
        .checked_div(denominator)
}
