//! Attorney fee calculators: tiered percentage fees and fixed-band overrides.

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::{max, round_whole};
use crate::calculations::resolver::resolve;
use crate::models::{FixedBand, Tier};

/// Percentage fee from the tier covering `amount`, or `None` when no tier
/// covers it.
///
/// The fee is `amount * rate` rounded to whole units and raised to the tier's
/// minimum fee when one is set. Products too large for a [`Decimal`] saturate
/// instead of panicking.
pub fn resolve_tiered_fee(
    amount: Decimal,
    tiers: &[Tier],
) -> Option<Decimal> {
    let tier = resolve(amount, tiers)?;
    let computed = round_whole(amount.saturating_mul(tier.rate));

    Some(match tier.minimum_fee {
        Some(minimum_fee) => max(computed, minimum_fee),
        None => computed,
    })
}

/// Percentage fee from the tier covering `amount`; `0` when no tier does.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use conveyance_core::calculations::fees::tiered_fee;
/// use conveyance_core::Tier;
///
/// let tiers = vec![Tier { upper_bound: None, rate: dec!(0.009), minimum_fee: Some(dec!(5000)) }];
///
/// assert_eq!(tiered_fee(dec!(1000000), &tiers), dec!(9000));
/// assert_eq!(tiered_fee(dec!(100000), &tiers), dec!(5000));
/// ```
pub fn tiered_fee(
    amount: Decimal,
    tiers: &[Tier],
) -> Decimal {
    resolve_tiered_fee(amount, tiers).unwrap_or(Decimal::ZERO)
}

/// Flat ex-VAT fee of the band covering `amount`.
///
/// `None` means "not applicable": either the schedule defines no fixed bands
/// or none of them covers the amount, and the caller should fall through to
/// the tiered calculation. The fee is returned verbatim, unrounded.
pub fn fixed_band_fee(
    amount: Decimal,
    bands: Option<&[FixedBand]>,
) -> Option<Decimal> {
    let band = resolve(amount, bands?)?;
    debug!(%amount, fee = %band.fee_ex_vat, "fixed band applies");
    Some(band.fee_ex_vat)
}

/// Attorney fee before VAT: the fixed band when one applies, else the tier.
///
/// `None` only when neither a band nor a tier covers the amount.
pub fn attorney_fee_ex_vat(
    amount: Decimal,
    tiers: &[Tier],
    fixed_bands: Option<&[FixedBand]>,
) -> Option<Decimal> {
    fixed_band_fee(amount, fixed_bands).or_else(|| resolve_tiered_fee(amount, tiers))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn bond_tiers() -> Vec<Tier> {
        vec![
            Tier {
                upper_bound: Some(dec!(2000000)),
                rate: dec!(0.009),
                minimum_fee: Some(dec!(4500)),
            },
            Tier {
                upper_bound: None,
                rate: dec!(0.008),
                minimum_fee: None,
            },
        ]
    }

    fn bond_fixed_bands() -> Vec<FixedBand> {
        vec![
            FixedBand {
                lower_bound: Some(dec!(2000000)),
                upper_bound: Some(dec!(2500000)),
                fee_ex_vat: dec!(40550),
            },
            FixedBand {
                lower_bound: Some(dec!(2500000)),
                upper_bound: Some(dec!(3000000)),
                fee_ex_vat: dec!(45870),
            },
        ]
    }

    // =========================================================================
    // tiered_fee tests
    // =========================================================================

    #[test]
    fn tiered_fee_applies_first_tier_rate() {
        assert_eq!(tiered_fee(dec!(1000000), &bond_tiers()), dec!(9000));
    }

    #[test]
    fn tiered_fee_applies_tail_rate() {
        assert_eq!(tiered_fee(dec!(5000000), &bond_tiers()), dec!(40000));
    }

    #[test]
    fn tiered_fee_rounds_to_whole_units() {
        // 123457 * 0.009 = 1111.113
        let tiers = vec![Tier {
            upper_bound: None,
            rate: dec!(0.009),
            minimum_fee: None,
        }];

        assert_eq!(tiered_fee(dec!(123457), &tiers), dec!(1111));
        // 1501 * 0.5 = 750.5 rounds away from zero
        let half = vec![Tier {
            upper_bound: None,
            rate: dec!(0.5),
            minimum_fee: None,
        }];
        assert_eq!(tiered_fee(dec!(1501), &half), dec!(751));
    }

    #[test]
    fn tiered_fee_raises_to_minimum_fee() {
        // 200000 * 0.009 = 1800, below the 4500 floor
        assert_eq!(tiered_fee(dec!(200000), &bond_tiers()), dec!(4500));
    }

    #[test]
    fn tiered_fee_zero_amount_gets_minimum_fee() {
        assert_eq!(tiered_fee(Decimal::ZERO, &bond_tiers()), dec!(4500));
    }

    #[test]
    fn tiered_fee_no_tiers_is_zero() {
        assert_eq!(tiered_fee(dec!(1000000), &[]), Decimal::ZERO);
        assert_eq!(resolve_tiered_fee(dec!(1000000), &[]), None);
    }

    #[test]
    fn tiered_fee_missing_rate_is_zero_rate() {
        let tiers: Vec<Tier> = serde_json::from_str(r#"[{ "upperBound": null }]"#).unwrap();

        assert_eq!(tiers[0].rate, Decimal::ZERO);
        assert_eq!(tiered_fee(dec!(1000000), &tiers), Decimal::ZERO);
        // A correctly computed zero is still a match.
        assert_eq!(resolve_tiered_fee(dec!(1000000), &tiers), Some(Decimal::ZERO));
    }

    #[test]
    fn tiered_fee_accepts_negative_rate() {
        let tiers = vec![Tier {
            upper_bound: None,
            rate: dec!(-0.01),
            minimum_fee: None,
        }];

        assert_eq!(tiered_fee(dec!(100000), &tiers), dec!(-1000));
    }

    #[test]
    fn tiered_fee_saturates_on_overflow() {
        let tiers = vec![Tier {
            upper_bound: None,
            rate: dec!(2),
            minimum_fee: None,
        }];

        assert_eq!(tiered_fee(Decimal::MAX, &tiers), Decimal::MAX);
    }

    #[test]
    fn tiered_fee_is_monotonic_within_a_tier() {
        let tiers = bond_tiers();
        let mut previous = Decimal::MIN;

        for step in 0..=40 {
            let amount = dec!(500000) + Decimal::from(step) * dec!(37500);
            let fee = tiered_fee(amount, &tiers);
            assert!(fee >= previous, "fee dropped at {amount}");
            previous = fee;
        }
    }

    // =========================================================================
    // fixed_band_fee tests
    // =========================================================================

    #[test]
    fn fixed_band_fee_absent_bands_not_applicable() {
        assert_eq!(fixed_band_fee(dec!(3000000), None), None);
    }

    #[test]
    fn fixed_band_fee_returns_fee_verbatim() {
        let bands = vec![FixedBand {
            lower_bound: None,
            upper_bound: Some(dec!(100)),
            fee_ex_vat: dec!(1234.56),
        }];

        assert_eq!(fixed_band_fee(dec!(50), Some(bands.as_slice())), Some(dec!(1234.56)));
    }

    #[test]
    fn fixed_band_fee_unmatched_not_applicable() {
        let bands = bond_fixed_bands();

        assert_eq!(fixed_band_fee(dec!(1000000), Some(bands.as_slice())), None);
        assert_eq!(fixed_band_fee(dec!(5000000), Some(bands.as_slice())), None);
    }

    #[test]
    fn fixed_band_fee_empty_bands_not_applicable() {
        assert_eq!(fixed_band_fee(dec!(3000000), Some(&[][..])), None);
    }

    // =========================================================================
    // attorney_fee_ex_vat tests
    // =========================================================================

    #[test]
    fn attorney_fee_prefers_fixed_band_over_tier() {
        let tiers = bond_tiers();
        let bands = bond_fixed_bands();

        // The tail tier would give 24000; the band must win.
        let fee = attorney_fee_ex_vat(dec!(3000000), &tiers, Some(bands.as_slice()));

        assert_eq!(fee, Some(dec!(45870)));
    }

    #[test]
    fn attorney_fee_band_covers_amounts_with_cents() {
        let tiers = bond_tiers();
        let bands = bond_fixed_bands();

        assert_eq!(attorney_fee_ex_vat(dec!(2000000.50), &tiers, Some(bands.as_slice())), Some(dec!(40550)));
        assert_eq!(attorney_fee_ex_vat(dec!(2500000.50), &tiers, Some(bands.as_slice())), Some(dec!(45870)));
        // The band floor itself still belongs to the tier below.
        assert_eq!(attorney_fee_ex_vat(dec!(2000000), &tiers, Some(bands.as_slice())), Some(dec!(18000)));
    }

    #[test]
    fn attorney_fee_falls_through_to_tier_outside_bands() {
        let tiers = bond_tiers();
        let bands = bond_fixed_bands();

        assert_eq!(attorney_fee_ex_vat(dec!(1000000), &tiers, Some(bands.as_slice())), Some(dec!(9000)));
        assert_eq!(attorney_fee_ex_vat(dec!(5000000), &tiers, Some(bands.as_slice())), Some(dec!(40000)));
    }

    #[test]
    fn attorney_fee_no_rules_is_none() {
        assert_eq!(attorney_fee_ex_vat(dec!(1000000), &[], None), None);
    }
}
