use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationResult {
    pub monthly_payment: Decimal,
    pub total_repayment: Decimal,
    pub total_interest: Decimal,
}

/// One instalment of an amortization schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledPayment {
    pub payment_number: u32,
    pub opening_balance: Decimal,
    pub payment: Decimal,
    pub interest: Decimal,
    pub principal: Decimal,
    pub closing_balance: Decimal,
}
