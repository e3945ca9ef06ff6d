use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tier {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper_bound: Option<Decimal>,
    /// Fraction of the amount charged, e.g. `0.009` for 0.9 %.
    #[serde(default)]
    pub rate: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_fee: Option<Decimal>,
}
