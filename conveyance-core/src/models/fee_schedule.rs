use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{DisbursementSet, FixedBand, Tier};

/// Attorney fee, deeds office and disbursement rules for one transaction type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeSchedule {
    #[serde(default)]
    pub tiers: Vec<Tier>,

    /// Flat ex-VAT fees that replace the tiered fee inside their range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_bands: Option<Vec<FixedBand>>,

    #[serde(default, alias = "deedsOfficeByBond", alias = "deedsOfficeByPrice")]
    pub deeds_office_bands: Vec<FixedBand>,

    #[serde(default)]
    pub disbursements: DisbursementSet,

    /// VAT applied to the attorney fee only, e.g. `0.15`.
    pub vat_rate: Decimal,
}
