//! Assembles attorney fees, deeds office fees, disbursements and duty into a
//! [`CostBreakdown`].
//!
//! | Line item | Source | VAT |
//! |-----------|--------|-----|
//! | Attorney fee | fixed band if one covers the amount, else tier | yes |
//! | Deeds office fee | deeds office band | no |
//! | Disbursements | constants relevant to the transaction kind | no |
//! | Transfer duty | dated duty schedule (transfers only) | no |
//!
//! VAT is only ever applied to the attorney fee.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calculations::common::round_whole;
use crate::calculations::duty::{DutyAssessment, calculate_transfer_duty};
use crate::calculations::fees::attorney_fee_ex_vat;
use crate::calculations::resolver::resolve;
use crate::models::{
    CostBreakdown, Diagnostic, DisbursementLine, DutySchedule, FeeSchedule, TransactionKind,
};

/// Costs of registering a mortgage bond of `bond_amount`.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use conveyance_core::calculations::composer::compose_bond_costs;
/// use conveyance_core::{DisbursementSet, FeeSchedule, FixedBand, Tier};
///
/// let schedule = FeeSchedule {
///     tiers: vec![Tier { upper_bound: None, rate: dec!(0.009), minimum_fee: None }],
///     fixed_bands: None,
///     deeds_office_bands: vec![FixedBand { lower_bound: None, upper_bound: None, fee_ex_vat: dec!(1646) }],
///     disbursements: DisbursementSet { postage: dec!(950), ..Default::default() },
///     vat_rate: dec!(0.15),
/// };
///
/// let breakdown = compose_bond_costs(dec!(1000000), &schedule);
///
/// assert_eq!(breakdown.attorney_fee_inc_vat, dec!(10350));
/// assert_eq!(breakdown.total, dec!(10350) + dec!(1646) + dec!(950));
/// ```
pub fn compose_bond_costs(
    bond_amount: Decimal,
    fee_schedule: &FeeSchedule,
) -> CostBreakdown {
    compose(TransactionKind::Bond, bond_amount, fee_schedule, None)
}

/// Costs of transferring a property bought for `purchase_price` on
/// `acquisition_date`, including transfer duty.
pub fn compose_transfer_costs(
    purchase_price: Decimal,
    fee_schedule: &FeeSchedule,
    duty_schedules: &[DutySchedule],
    acquisition_date: NaiveDate,
) -> CostBreakdown {
    let duty = calculate_transfer_duty(purchase_price, duty_schedules, acquisition_date);
    compose(TransactionKind::Transfer, purchase_price, fee_schedule, Some(duty))
}

fn compose(
    kind: TransactionKind,
    amount: Decimal,
    fee_schedule: &FeeSchedule,
    duty: Option<DutyAssessment>,
) -> CostBreakdown {
    let mut diagnostics = Vec::new();

    let attorney_fee_ex_vat = attorney_fee_ex_vat(
        amount,
        &fee_schedule.tiers,
        fee_schedule.fixed_bands.as_deref(),
    )
    .unwrap_or_else(|| {
        diagnostics.push(Diagnostic::NoAttorneyFeeRule { amount });
        Decimal::ZERO
    });
    let attorney_fee_inc_vat = round_whole(
        attorney_fee_ex_vat.saturating_mul(Decimal::ONE.saturating_add(fee_schedule.vat_rate)),
    );

    let deeds_office_fee = resolve(amount, &fee_schedule.deeds_office_bands)
        .map(|band| band.fee_ex_vat)
        .unwrap_or_else(|| {
            diagnostics.push(Diagnostic::NoDeedsOfficeBand { amount });
            Decimal::ZERO
        });

    let disbursements: Vec<DisbursementLine> = kind
        .disbursement_kinds()
        .iter()
        .map(|&disbursement| {
            let amount = fee_schedule.disbursements.amount(disbursement);
            if amount.is_zero() {
                debug!(disbursement = disbursement.as_str(), "disbursement not configured");
            }
            DisbursementLine {
                kind: disbursement,
                amount,
            }
        })
        .collect();
    let total_disbursements = disbursements
        .iter()
        .fold(Decimal::ZERO, |acc, line| acc.saturating_add(line.amount));

    let transfer_duty = duty.map(|assessment| {
        diagnostics.extend(assessment.diagnostics.into_iter().map(Diagnostic::from));
        assessment.duty
    });

    let total = attorney_fee_inc_vat
        .saturating_add(deeds_office_fee)
        .saturating_add(total_disbursements)
        .saturating_add(transfer_duty.unwrap_or_default());

    for diagnostic in &diagnostics {
        warn!(?kind, %diagnostic, "cost breakdown is degenerate");
    }

    CostBreakdown {
        kind,
        amount,
        attorney_fee_ex_vat,
        vat: attorney_fee_inc_vat.saturating_sub(attorney_fee_ex_vat),
        attorney_fee_inc_vat,
        deeds_office_fee,
        disbursements,
        total_disbursements,
        transfer_duty,
        total,
        diagnostics,
    }
}
