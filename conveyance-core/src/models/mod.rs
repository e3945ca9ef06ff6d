mod amortization;
mod cost_breakdown;
mod disbursements;
mod duty_schedule;
mod fee_schedule;
mod fixed_band;
mod rate_tables;
mod tier;

pub use amortization::{AmortizationResult, ScheduledPayment};
pub use cost_breakdown::{CostBreakdown, Diagnostic, DisbursementLine, DutyDiagnostic, TransactionKind};
pub use disbursements::{DisbursementKind, DisbursementSet};
pub use duty_schedule::{Bracket, DutySchedule};
pub use fee_schedule::FeeSchedule;
pub use fixed_band::FixedBand;
pub use rate_tables::RateTables;
pub use tier::Tier;
