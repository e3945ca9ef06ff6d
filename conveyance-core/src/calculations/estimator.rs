//! One-stop estimator over a loaded set of rate tables.
//!
//! [`CostEstimator`] borrows a [`RateTables`] and forwards to the individual
//! calculators, so callers holding several configurations (for example the
//! current and the proposed tariffs) can price the same transaction against
//! each without any shared state.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//! use conveyance_core::calculations::CostEstimator;
//! use conveyance_core::{Bracket, DutySchedule, FeeSchedule, RateTables, Tier};
//!
//! let fees = FeeSchedule {
//!     tiers: vec![Tier { upper_bound: None, rate: dec!(0.01), minimum_fee: None }],
//!     fixed_bands: None,
//!     deeds_office_bands: vec![],
//!     disbursements: Default::default(),
//!     vat_rate: dec!(0.15),
//! };
//! let tables = RateTables {
//!     duty_schedules: vec![DutySchedule {
//!         effective_from: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
//!         brackets: vec![Bracket {
//!             upper_bound: None,
//!             base: dec!(0),
//!             marginal_rate: dec!(0.03),
//!             threshold: dec!(1000000),
//!         }],
//!     }],
//!     transfer: fees.clone(),
//!     bond: fees,
//! };
//!
//! let estimator = CostEstimator::new(&tables);
//! let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
//! let breakdown = estimator.transfer_costs(dec!(2000000), date);
//!
//! assert_eq!(breakdown.transfer_duty, Some(dec!(30000)));
//! assert_eq!(breakdown.attorney_fee_ex_vat, dec!(20000));
//! ```

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::calculations::amortization::{amortization_schedule, monthly_repayment};
use crate::calculations::composer::{compose_bond_costs, compose_transfer_costs};
use crate::calculations::duty::{DutyAssessment, calculate_transfer_duty};
use crate::models::{AmortizationResult, CostBreakdown, RateTables, ScheduledPayment};

/// Prices transactions against one borrowed set of rate tables.
#[derive(Debug, Clone, Copy)]
pub struct CostEstimator<'a> {
    tables: &'a RateTables,
}

impl<'a> CostEstimator<'a> {
    pub fn new(tables: &'a RateTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &'a RateTables {
        self.tables
    }

    /// Full cost breakdown for registering a transfer, transfer duty included.
    pub fn transfer_costs(
        &self,
        purchase_price: Decimal,
        acquisition_date: NaiveDate,
    ) -> CostBreakdown {
        compose_transfer_costs(
            purchase_price,
            &self.tables.transfer,
            &self.tables.duty_schedules,
            acquisition_date,
        )
    }

    /// Full cost breakdown for registering a bond.
    pub fn bond_costs(
        &self,
        bond_amount: Decimal,
    ) -> CostBreakdown {
        compose_bond_costs(bond_amount, &self.tables.bond)
    }

    pub fn transfer_duty(
        &self,
        property_value: Decimal,
        acquisition_date: NaiveDate,
    ) -> DutyAssessment {
        calculate_transfer_duty(property_value, &self.tables.duty_schedules, acquisition_date)
    }

    pub fn repayment(
        &self,
        principal: Decimal,
        annual_rate_percent: Decimal,
        years: u32,
    ) -> AmortizationResult {
        monthly_repayment(principal, annual_rate_percent, years)
    }

    pub fn repayment_schedule(
        &self,
        principal: Decimal,
        annual_rate_percent: Decimal,
        years: u32,
    ) -> Vec<ScheduledPayment> {
        amortization_schedule(principal, annual_rate_percent, years)
    }
}
