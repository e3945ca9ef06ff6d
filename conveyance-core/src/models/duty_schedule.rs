use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One step of a progressive transfer duty schedule.
///
/// Duty for a value inside this bracket is
/// `base + max(0, value - threshold) * marginal_rate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bracket {
    /// Inclusive upper bound; `None` marks the open-ended final step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper_bound: Option<Decimal>,
    #[serde(default)]
    pub base: Decimal,
    #[serde(default)]
    pub marginal_rate: Decimal,
    #[serde(default)]
    pub threshold: Decimal,
}

/// A complete set of brackets in force from `effective_from` onwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DutySchedule {
    pub effective_from: NaiveDate,
    pub brackets: Vec<Bracket>,
}
