use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Names of the fixed pass-through costs a fee schedule may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DisbursementKind {
    Postage,
    ElectronicGenerationFee,
    DeedsOfficeSearchFee,
    RatesClearanceFee,
    FicaFee,
    ElectronicInstructionFee,
}

impl DisbursementKind {
    /// The field name used for this constant in rate-table documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Postage => "postage",
            Self::ElectronicGenerationFee => "electronicGenerationFee",
            Self::DeedsOfficeSearchFee => "deedsOfficeSearchFee",
            Self::RatesClearanceFee => "ratesClearanceFee",
            Self::FicaFee => "ficaFee",
            Self::ElectronicInstructionFee => "electronicInstructionFee",
        }
    }
}

/// Disbursement constants of one configuration version.
///
/// A constant absent from the source document is `0`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DisbursementSet {
    pub postage: Decimal,
    pub electronic_generation_fee: Decimal,
    pub deeds_office_search_fee: Decimal,
    pub rates_clearance_fee: Decimal,
    pub fica_fee: Decimal,
    pub electronic_instruction_fee: Decimal,
}

impl DisbursementSet {
    pub fn amount(
        &self,
        kind: DisbursementKind,
    ) -> Decimal {
        match kind {
            DisbursementKind::Postage => self.postage,
            DisbursementKind::ElectronicGenerationFee => self.electronic_generation_fee,
            DisbursementKind::DeedsOfficeSearchFee => self.deeds_office_search_fee,
            DisbursementKind::RatesClearanceFee => self.rates_clearance_fee,
            DisbursementKind::FicaFee => self.fica_fee,
            DisbursementKind::ElectronicInstructionFee => self.electronic_instruction_fee,
        }
    }
}
