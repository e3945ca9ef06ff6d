//! Property transaction cost calculations.
//!
//! Every calculator is a pure function of an amount and the rate tables it
//! is handed; nothing here reads configuration on its own. [`CostEstimator`]
//! bundles them over one [`RateTables`](crate::RateTables).

pub mod amortization;
pub mod common;
pub mod composer;
pub mod duty;
pub mod estimator;
pub mod fees;
pub mod resolver;

pub use amortization::{MAX_TERM_YEARS, amortization_schedule, monthly_repayment};
pub use composer::{compose_bond_costs, compose_transfer_costs};
pub use duty::{DutyAssessment, calculate_transfer_duty, select_schedule};
pub use estimator::CostEstimator;
pub use fees::{attorney_fee_ex_vat, fixed_band_fee, resolve_tiered_fee, tiered_fee};
pub use resolver::{Banded, resolve};
