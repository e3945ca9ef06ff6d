//! Transfer duty on the acquisition of property.
//!
//! Duty follows a progressive schedule that changes by legislation from time
//! to time. Each [`DutySchedule`] carries the date it came into force; the
//! schedule applied to a purchase is the most recent one whose
//! `effective_from` is on or before the acquisition date.
//!
//! Within the schedule the bracket covering the property value gives
//!
//! ```text
//! duty = base + max(0, value - threshold) * marginal_rate
//! ```
//!
//! rounded to whole rand.
//!
//! Configuration problems never abort the calculation. If the acquisition
//! date precedes every schedule, the first schedule in the list is used and a
//! [`DutyDiagnostic::NoScheduleInForce`] is attached to the assessment; if no
//! bracket covers the value, duty is `0` with
//! [`DutyDiagnostic::NoMatchingBracket`]. Both are also logged at `warn`.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//! use conveyance_core::calculations::duty::calculate_transfer_duty;
//! use conveyance_core::{Bracket, DutySchedule};
//!
//! let schedules = vec![DutySchedule {
//!     effective_from: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
//!     brackets: vec![
//!         Bracket { upper_bound: Some(dec!(1145000)), base: dec!(0), marginal_rate: dec!(0), threshold: dec!(0) },
//!         Bracket { upper_bound: None, base: dec!(0), marginal_rate: dec!(0.03), threshold: dec!(1145000) },
//!     ],
//! }];
//!
//! let assessment = calculate_transfer_duty(
//!     dec!(2000000),
//!     &schedules,
//!     NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
//! );
//!
//! assert_eq!(assessment.duty, dec!(25650));
//! assert!(assessment.diagnostics.is_empty());
//! ```

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculations::common::{max, round_whole};
use crate::calculations::resolver::resolve;
use crate::models::{Bracket, DutySchedule, DutyDiagnostic};

/// Result of a transfer duty calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DutyAssessment {
    /// Duty payable in whole rand.
    pub duty: Decimal,

    /// Effective date of the schedule that was applied, if any.
    pub effective_from: Option<NaiveDate>,

    /// Configuration anomalies met on the way. Empty for a clean result.
    pub diagnostics: Vec<DutyDiagnostic>,
}

impl DutyAssessment {
    /// True when `duty` was computed from the schedule in force without any
    /// fallback.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// The schedule in force on `acquisition_date`, if any.
pub fn select_schedule(
    schedules: &[DutySchedule],
    acquisition_date: NaiveDate,
) -> Option<&DutySchedule> {
    schedules
        .iter()
        .filter(|schedule| schedule.effective_from <= acquisition_date)
        .max_by_key(|schedule| schedule.effective_from)
}

/// Duty for `property_value` under a single bracket.
pub fn bracket_duty(
    property_value: Decimal,
    bracket: &Bracket,
) -> Decimal {
    let above_threshold = max(
        property_value.saturating_sub(bracket.threshold),
        Decimal::ZERO,
    );
    let duty = bracket
        .base
        .saturating_add(above_threshold.saturating_mul(bracket.marginal_rate));

    round_whole(duty)
}

/// Calculates transfer duty for a property acquired on `acquisition_date`.
///
/// The acquisition date is always supplied by the caller; capture "today"
/// once at the edge of the application when no date is given.
pub fn calculate_transfer_duty(
    property_value: Decimal,
    schedules: &[DutySchedule],
    acquisition_date: NaiveDate,
) -> DutyAssessment {
    let mut diagnostics = Vec::new();

    let schedule = match select_schedule(schedules, acquisition_date) {
        Some(schedule) => schedule,
        None => {
            let Some(fallback) = schedules.first() else {
                let diagnostic = DutyDiagnostic::NoSchedules;
                warn!(%diagnostic, "transfer duty set to 0");
                return DutyAssessment {
                    duty: Decimal::ZERO,
                    effective_from: None,
                    diagnostics: vec![diagnostic],
                };
            };

            let diagnostic = DutyDiagnostic::NoScheduleInForce {
                acquisition_date,
                fallback_effective_from: fallback.effective_from,
            };
            warn!(%diagnostic, "using fallback duty schedule");
            diagnostics.push(diagnostic);
            fallback
        }
    };

    debug!(
        effective_from = %schedule.effective_from,
        %acquisition_date,
        "duty schedule selected"
    );

    let duty = match resolve(property_value, &schedule.brackets) {
        Some(bracket) => bracket_duty(property_value, bracket),
        None => {
            let diagnostic = DutyDiagnostic::NoMatchingBracket {
                property_value,
                effective_from: schedule.effective_from,
            };
            warn!(%diagnostic, "transfer duty set to 0");
            diagnostics.push(diagnostic);
            Decimal::ZERO
        }
    };

    DutyAssessment {
        duty,
        effective_from: Some(schedule.effective_from),
        diagnostics,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn date(
        year: i32,
        month: u32,
        day: u32,
    ) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn bracket(
        upper_bound: Option<Decimal>,
        base: Decimal,
        marginal_rate: Decimal,
        threshold: Decimal,
    ) -> Bracket {
        Bracket {
            upper_bound,
            base,
            marginal_rate,
            threshold,
        }
    }

    fn schedule_2023() -> DutySchedule {
        DutySchedule {
            effective_from: date(2023, 3, 1),
            brackets: vec![
                bracket(Some(dec!(1100000)), dec!(0), dec!(0), dec!(0)),
                bracket(Some(dec!(1512500)), dec!(0), dec!(0.03), dec!(1100000)),
                bracket(Some(dec!(2117500)), dec!(12375), dec!(0.06), dec!(1512500)),
                bracket(Some(dec!(2722500)), dec!(48675), dec!(0.08), dec!(2117500)),
                bracket(Some(dec!(12100000)), dec!(97075), dec!(0.11), dec!(2722500)),
                bracket(None, dec!(1128600), dec!(0.13), dec!(12100000)),
            ],
        }
    }

    fn schedule_2025() -> DutySchedule {
        DutySchedule {
            effective_from: date(2025, 4, 1),
            brackets: vec![
                bracket(Some(dec!(1145000)), dec!(0), dec!(0), dec!(0)),
                bracket(Some(dec!(2145000)), dec!(0), dec!(0.03), dec!(1145000)),
                bracket(Some(dec!(2745000)), dec!(30000), dec!(0.06), dec!(2145000)),
                bracket(Some(dec!(3545000)), dec!(66000), dec!(0.08), dec!(2745000)),
                bracket(Some(dec!(12500000)), dec!(130000), dec!(0.11), dec!(3545000)),
                bracket(None, dec!(1115050), dec!(0.13), dec!(12500000)),
            ],
        }
    }

    fn schedules() -> Vec<DutySchedule> {
        vec![schedule_2023(), schedule_2025()]
    }

    // =========================================================================
    // select_schedule tests
    // =========================================================================

    #[test]
    fn select_schedule_picks_latest_in_force() {
        let schedules = schedules();

        let selected = select_schedule(&schedules, date(2025, 10, 1)).unwrap();

        assert_eq!(selected.effective_from, date(2025, 4, 1));
    }

    #[test]
    fn select_schedule_effective_date_is_inclusive() {
        let schedules = schedules();

        assert_eq!(
            select_schedule(&schedules, date(2025, 4, 1)).map(|s| s.effective_from),
            Some(date(2025, 4, 1))
        );
        assert_eq!(
            select_schedule(&schedules, date(2025, 3, 31)).map(|s| s.effective_from),
            Some(date(2023, 3, 1))
        );
    }

    #[test]
    fn select_schedule_ignores_list_order() {
        let mut schedules = schedules();
        schedules.reverse();

        let selected = select_schedule(&schedules, date(2026, 1, 1)).unwrap();

        assert_eq!(selected.effective_from, date(2025, 4, 1));
    }

    #[test]
    fn select_schedule_none_before_first_schedule() {
        assert_eq!(select_schedule(&schedules(), date(2020, 1, 1)), None);
    }

    // =========================================================================
    // bracket_duty tests
    // =========================================================================

    #[test]
    fn bracket_duty_applies_base_and_marginal_rate() {
        let b = bracket(Some(dec!(2117500)), dec!(12375), dec!(0.06), dec!(1512500));

        // 12375 + (2000000 - 1512500) * 0.06 = 12375 + 29250
        assert_eq!(bracket_duty(dec!(2000000), &b), dec!(41625));
    }

    #[test]
    fn bracket_duty_never_negative_below_threshold() {
        let b = bracket(None, dec!(0), dec!(0.03), dec!(1145000));

        assert_eq!(bracket_duty(dec!(500000), &b), Decimal::ZERO);
    }

    #[test]
    fn bracket_duty_rounds_to_whole_units() {
        let b = bracket(None, dec!(0), dec!(0.03), dec!(1145000));

        // 150 * 0.03 = 4.5
        assert_eq!(bracket_duty(dec!(1145150), &b), dec!(5));
        // 10 * 0.03 = 0.3
        assert_eq!(bracket_duty(dec!(1145010), &b), dec!(0));
    }

    // =========================================================================
    // calculate_transfer_duty tests
    // =========================================================================

    #[test]
    fn duty_two_million_under_current_schedule() {
        let assessment = calculate_transfer_duty(dec!(2000000), &schedules(), date(2025, 6, 1));

        assert_eq!(assessment.duty, dec!(25650));
        assert_eq!(assessment.effective_from, Some(date(2025, 4, 1)));
        assert!(assessment.is_clean());
    }

    #[test]
    fn duty_two_million_under_previous_schedule() {
        let assessment = calculate_transfer_duty(dec!(2000000), &schedules(), date(2024, 6, 1));

        assert_eq!(assessment.duty, dec!(41625));
        assert_eq!(assessment.effective_from, Some(date(2023, 3, 1)));
    }

    #[test]
    fn duty_zero_below_exemption_threshold() {
        let assessment = calculate_transfer_duty(dec!(1145000), &schedules(), date(2025, 6, 1));

        assert_eq!(assessment.duty, Decimal::ZERO);
        assert!(assessment.is_clean());
    }

    #[test]
    fn duty_at_bracket_boundaries_is_continuous() {
        let schedules = schedules();
        let on = date(2025, 6, 1);

        assert_eq!(calculate_transfer_duty(dec!(2145000), &schedules, on).duty, dec!(30000));
        assert_eq!(calculate_transfer_duty(dec!(2745000), &schedules, on).duty, dec!(66000));
        assert_eq!(calculate_transfer_duty(dec!(3545000), &schedules, on).duty, dec!(130000));
        assert_eq!(calculate_transfer_duty(dec!(12500000), &schedules, on).duty, dec!(1115050));
    }

    #[test]
    fn duty_top_bracket() {
        let assessment = calculate_transfer_duty(dec!(20000000), &schedules(), date(2025, 6, 1));

        // 1115050 + 7500000 * 0.13
        assert_eq!(assessment.duty, dec!(2090050));
    }

    #[test]
    fn duty_negative_value_is_zero() {
        let assessment = calculate_transfer_duty(dec!(-100), &schedules(), date(2025, 6, 1));

        assert_eq!(assessment.duty, Decimal::ZERO);
    }

    #[test]
    fn duty_is_monotonic_in_property_value() {
        let schedules = schedules();
        let on = date(2025, 6, 1);
        let mut previous = Decimal::ZERO;

        for step in 0..=200 {
            let value = Decimal::from(step) * dec!(100000);
            let duty = calculate_transfer_duty(value, &schedules, on).duty;
            assert!(duty >= previous, "duty dropped at {value}");
            previous = duty;
        }
    }

    #[test]
    fn duty_falls_back_to_first_schedule_with_diagnostic() {
        let assessment = calculate_transfer_duty(dec!(2000000), &schedules(), date(2020, 1, 1));

        // First schedule in the list is the 2023 one.
        assert_eq!(assessment.duty, dec!(41625));
        assert_eq!(
            assessment.diagnostics,
            vec![DutyDiagnostic::NoScheduleInForce {
                acquisition_date: date(2020, 1, 1),
                fallback_effective_from: date(2023, 3, 1),
            }]
        );
        assert!(!assessment.is_clean());
    }

    #[test]
    fn duty_fallback_uses_list_order_not_date_order() {
        let mut schedules = schedules();
        schedules.reverse();

        let assessment = calculate_transfer_duty(dec!(2000000), &schedules, date(2020, 1, 1));

        assert_eq!(assessment.duty, dec!(25650));
        assert_eq!(assessment.effective_from, Some(date(2025, 4, 1)));
    }

    #[test]
    fn duty_no_schedules_is_zero_with_diagnostic() {
        let assessment = calculate_transfer_duty(dec!(2000000), &[], date(2025, 6, 1));

        assert_eq!(assessment.duty, Decimal::ZERO);
        assert_eq!(assessment.effective_from, None);
        assert_eq!(assessment.diagnostics, vec![DutyDiagnostic::NoSchedules]);
    }

    #[test]
    fn duty_no_matching_bracket_is_zero_with_diagnostic() {
        let schedules = vec![DutySchedule {
            effective_from: date(2025, 4, 1),
            brackets: vec![bracket(Some(dec!(1000000)), dec!(0), dec!(0.03), dec!(0))],
        }];

        let assessment = calculate_transfer_duty(dec!(2000000), &schedules, date(2025, 6, 1));

        assert_eq!(assessment.duty, Decimal::ZERO);
        assert_eq!(
            assessment.diagnostics,
            vec![DutyDiagnostic::NoMatchingBracket {
                property_value: dec!(2000000),
                effective_from: date(2025, 4, 1),
            }]
        );
    }

    #[test]
    fn duty_is_deterministic() {
        let schedules = schedules();

        let first = calculate_transfer_duty(dec!(3333333.33), &schedules, date(2025, 6, 1));
        let second = calculate_transfer_duty(dec!(3333333.33), &schedules, date(2025, 6, 1));

        assert_eq!(first, second);
    }
}
