use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A flat fee for the amount range `(lower_bound, upper_bound]`.
///
/// Used for attorney fee overrides and for deeds office fees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedBand {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lower_bound: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper_bound: Option<Decimal>,
    #[serde(default)]
    pub fee_ex_vat: Decimal,
}
