//! Structural checks applied to every rate table the loader decodes.
//!
//! The calculators trust the order of their rule lists, so anything that
//! would make a first-match lookup ambiguous is rejected here instead.

use std::collections::HashSet;

use chrono::NaiveDate;
use conveyance_core::calculations::Banded;
use conveyance_core::{DutySchedule, FeeSchedule, FixedBand, RateTables};
use rust_decimal::Decimal;
use thiserror::Error;

/// A rate table that would resolve amounts ambiguously or not at all.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("no duty schedules defined")]
    NoDutySchedules,

    #[error("more than one duty schedule effective from {0}")]
    DuplicateEffectiveFrom(NaiveDate),

    #[error("{table} is empty")]
    EmptyTable { table: String },

    #[error("{table}: entry {index} does not rise above the previous upper bound")]
    NotAscending { table: String, index: usize },

    #[error("{table}: unbounded entry {index} is not the last entry")]
    UnboundedNotLast { table: String, index: usize },

    #[error("{table}: the last entry must have no upper bound")]
    MissingCatchAll { table: String },

    #[error("{table}: entry {index} has a lower bound at or above its upper bound")]
    InvertedBand { table: String, index: usize },

    #[error("{table}: VAT rate {rate} is negative")]
    NegativeVatRate { table: String, rate: Decimal },
}

/// Validates every table in a loaded configuration.
pub fn validate_rate_tables(tables: &RateTables) -> Result<(), ValidationError> {
    validate_duty_schedules(&tables.duty_schedules)?;
    validate_fee_schedule("transfer", &tables.transfer)?;
    validate_fee_schedule("bond", &tables.bond)
}

/// At least one schedule, unique effective dates, and a complete bracket
/// list in each.
pub fn validate_duty_schedules(schedules: &[DutySchedule]) -> Result<(), ValidationError> {
    if schedules.is_empty() {
        return Err(ValidationError::NoDutySchedules);
    }

    let mut seen = HashSet::new();
    for schedule in schedules {
        if !seen.insert(schedule.effective_from) {
            return Err(ValidationError::DuplicateEffectiveFrom(schedule.effective_from));
        }

        let table = format!("duty schedule {}", schedule.effective_from);
        validate_covering(&table, &schedule.brackets)?;
    }

    Ok(())
}

/// Tiers must cover every amount; band tables only need a sane order.
pub fn validate_fee_schedule(
    name: &str,
    schedule: &FeeSchedule,
) -> Result<(), ValidationError> {
    if schedule.vat_rate < Decimal::ZERO {
        return Err(ValidationError::NegativeVatRate {
            table: name.to_string(),
            rate: schedule.vat_rate,
        });
    }

    validate_covering(&format!("{name} tiers"), &schedule.tiers)?;

    if let Some(bands) = &schedule.fixed_bands {
        validate_bands(&format!("{name} fixed bands"), bands)?;
    }
    validate_bands(&format!("{name} deeds office bands"), &schedule.deeds_office_bands)
}

/// Strictly ascending upper bounds ending in exactly one catch-all.
fn validate_covering<R: Banded<Decimal>>(
    table: &str,
    rules: &[R],
) -> Result<(), ValidationError> {
    if rules.is_empty() {
        return Err(ValidationError::EmptyTable {
            table: table.to_string(),
        });
    }

    validate_ascending(table, rules)?;

    match rules.last().and_then(|rule| rule.upper_bound()) {
        None => Ok(()),
        Some(_) => Err(ValidationError::MissingCatchAll {
            table: table.to_string(),
        }),
    }
}

/// Ascending, optionally capped by a catch-all, with no inverted band.
fn validate_bands(
    table: &str,
    bands: &[FixedBand],
) -> Result<(), ValidationError> {
    for (index, band) in bands.iter().enumerate() {
        if let (Some(lower), Some(upper)) = (band.lower_bound, band.upper_bound) {
            if lower >= upper {
                return Err(ValidationError::InvertedBand {
                    table: table.to_string(),
                    index,
                });
            }
        }
    }

    validate_ascending(table, bands)
}

fn validate_ascending<R: Banded<Decimal>>(
    table: &str,
    rules: &[R],
) -> Result<(), ValidationError> {
    let mut previous: Option<Decimal> = None;

    for (index, rule) in rules.iter().enumerate() {
        let Some(upper) = rule.upper_bound() else {
            if index + 1 != rules.len() {
                return Err(ValidationError::UnboundedNotLast {
                    table: table.to_string(),
                    index,
                });
            }
            continue;
        };

        if previous.is_some_and(|prev| upper <= prev) {
            return Err(ValidationError::NotAscending {
                table: table.to_string(),
                index,
            });
        }
        previous = Some(upper);
    }

    Ok(())
}
