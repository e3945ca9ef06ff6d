use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::DisbursementKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransactionKind {
    /// Registration of transfer of ownership; attracts transfer duty.
    Transfer,
    /// Registration of a mortgage bond.
    Bond,
}

impl TransactionKind {
    /// Disbursements charged for this kind of transaction, in display order.
    pub fn disbursement_kinds(&self) -> &'static [DisbursementKind] {
        match self {
            Self::Transfer => &[
                DisbursementKind::Postage,
                DisbursementKind::ElectronicGenerationFee,
                DisbursementKind::DeedsOfficeSearchFee,
                DisbursementKind::RatesClearanceFee,
                DisbursementKind::FicaFee,
            ],
            Self::Bond => &[
                DisbursementKind::Postage,
                DisbursementKind::ElectronicGenerationFee,
                DisbursementKind::DeedsOfficeSearchFee,
                DisbursementKind::ElectronicInstructionFee,
            ],
        }
    }
}

/// Recoverable anomalies found while calculating transfer duty.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum DutyDiagnostic {
    #[error("no duty schedules configured")]
    NoSchedules,

    #[error(
        "acquisition date {acquisition_date} precedes every duty schedule; \
         fell back to schedule effective {fallback_effective_from}"
    )]
    #[serde(rename_all = "camelCase")]
    NoScheduleInForce {
        acquisition_date: NaiveDate,
        fallback_effective_from: NaiveDate,
    },

    #[error("no duty bracket in schedule effective {effective_from} matches {property_value}")]
    #[serde(rename_all = "camelCase")]
    NoMatchingBracket {
        property_value: Decimal,
        effective_from: NaiveDate,
    },
}

/// Anything a composed breakdown wants its caller to know about.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Diagnostic {
    #[error("no fixed band or tier covers {amount}; attorney fee set to 0")]
    NoAttorneyFeeRule { amount: Decimal },

    #[error("no deeds office band covers {amount}; deeds office fee set to 0")]
    NoDeedsOfficeBand { amount: Decimal },

    #[error(transparent)]
    Duty(#[from] DutyDiagnostic),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisbursementLine {
    pub kind: DisbursementKind,
    pub amount: Decimal,
}

/// Line items and total of one transfer or bond cost estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub kind: TransactionKind,

    /// Purchase price (transfer) or bond amount (bond).
    pub amount: Decimal,

    pub attorney_fee_ex_vat: Decimal,
    pub vat: Decimal,
    pub attorney_fee_inc_vat: Decimal,
    pub deeds_office_fee: Decimal,

    pub disbursements: Vec<DisbursementLine>,
    pub total_disbursements: Decimal,

    /// Present for transfers only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_duty: Option<Decimal>,

    pub total: Decimal,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl CostBreakdown {
    /// Everything in the total that is not subject to VAT.
    pub fn vat_exempt_total(&self) -> Decimal {
        self.total_disbursements + self.deeds_office_fee + self.transfer_duty.unwrap_or_default()
    }
}
