//! ETCL classifier and recommendation tests
//!
//! Covers the tier ladder, the hour-based label breakpoints, band
//! sampling, and the recommendation template selection order.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::risk::{classify, etcl_label, recommend, sample};
use shared::RiskLevel;

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Hot and wet batch: compound conditions trip the critical tier and
    /// the aflatoxin flag
    #[test]
    fn test_critical_tier_scenario() {
        let result = classify(dec("80"), dec("32"));

        assert_eq!(result.risk_level, RiskLevel::Critical);
        assert!(result.aflatoxin_risk);
        assert!(result.etcl_hours >= dec("24"));
        assert!(result.etcl_hours < dec("48"));
    }

    /// Cool and dry batch sits in the low tier with a long horizon
    #[test]
    fn test_low_tier_scenario() {
        let result = classify(dec("55"), dec("22"));

        assert_eq!(result.risk_level, RiskLevel::Low);
        assert!(!result.aflatoxin_risk);
        assert!(result.etcl_hours >= dec("144"));
        assert!(result.etcl_hours < dec("312"));
    }

    /// Critical needs BOTH thresholds; one alone falls through to high
    #[test]
    fn test_critical_requires_compound_conditions() {
        // Wet but not hot
        let wet = classify(dec("80"), dec("20"));
        assert_eq!(wet.risk_level, RiskLevel::High);
        assert!(!wet.aflatoxin_risk);

        // Hot but not wet
        let hot = classify(dec("40"), dec("33"));
        assert_eq!(hot.risk_level, RiskLevel::High);
    }

    /// Threshold boundaries are strict
    #[test]
    fn test_tier_boundaries_are_exclusive() {
        // Exactly at the high thresholds: falls to the next rung
        let at_high = classify(dec("70"), dec("25"));
        assert_eq!(at_high.risk_level, RiskLevel::Medium);

        // Exactly at the medium thresholds: falls to low
        let at_medium = classify(dec("65"), dec("25"));
        assert_eq!(at_medium.risk_level, RiskLevel::Low);

        let just_above = classify(dec("65.1"), dec("25"));
        assert_eq!(just_above.risk_level, RiskLevel::Medium);
    }

    /// Temperature alone can raise the tier
    #[test]
    fn test_temperature_alone_raises_tier() {
        assert_eq!(classify(dec("30"), dec("29")).risk_level, RiskLevel::High);
        assert_eq!(classify(dec("30"), dec("26")).risk_level, RiskLevel::Medium);
    }

    /// Label selection uses the numeric hours, not the tier name: a
    /// critical-tier midpoint of 36h reads as a 1-2 day label
    #[test]
    fn test_label_is_separate_from_tier() {
        let critical = classify(dec("80"), dec("32"));
        let (label, _) = etcl_label(critical.etcl_hours);

        assert_eq!(critical.risk_level, RiskLevel::Critical);
        assert_eq!(label, "High – 1–2 days");
    }

    #[test]
    fn test_label_breakpoints() {
        assert_eq!(etcl_label(dec("12")).0, "Critical – less than 1 day");
        assert_eq!(etcl_label(dec("23.9")).0, "Critical – less than 1 day");
        assert_eq!(etcl_label(dec("24")).0, "High – 1–2 days");
        assert_eq!(etcl_label(dec("47.9")).0, "High – 1–2 days");
        assert_eq!(etcl_label(dec("48")).0, "Medium – 2–4 days");
        assert_eq!(etcl_label(dec("95.9")).0, "Medium – 2–4 days");
        assert_eq!(etcl_label(dec("96")).0, "Low – 4+ days");
        assert_eq!(etcl_label(dec("300")).0, "Low – 4+ days");
    }

    /// Every label carries a Bengali counterpart
    #[test]
    fn test_labels_bilingual() {
        for hours in ["12", "36", "72", "200"] {
            let (en, bn) = etcl_label(dec(hours));
            assert!(!en.is_empty());
            assert!(!bn.is_empty());
        }
    }

    /// Sampled estimates stay inside the tier band and agree on the tier
    #[test]
    fn test_sampled_hours_stay_in_band() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..100 {
            let sampled = sample(dec("80"), dec("32"), &mut rng);
            assert_eq!(sampled.risk_level, RiskLevel::Critical);
            assert!(sampled.etcl_hours >= dec("24"));
            assert!(sampled.etcl_hours <= dec("48"));
            assert!(sampled.aflatoxin_risk);
        }
    }

    /// The high tier's aflatoxin flag is a coin flip on the sampling path
    #[test]
    fn test_sampled_high_tier_aflatoxin_varies() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen_true = false;
        let mut seen_false = false;

        for _ in 0..200 {
            let sampled = sample(dec("72"), dec("20"), &mut rng);
            assert_eq!(sampled.risk_level, RiskLevel::High);
            if sampled.aflatoxin_risk {
                seen_true = true;
            } else {
                seen_false = true;
            }
        }

        assert!(seen_true && seen_false);
    }

    /// The deterministic path never flags aflatoxin below critical
    #[test]
    fn test_deterministic_aflatoxin_only_when_critical() {
        assert!(classify(dec("76"), dec("31")).aflatoxin_risk);
        assert!(!classify(dec("72"), dec("20")).aflatoxin_risk);
        assert!(!classify(dec("67"), dec("24")).aflatoxin_risk);
        assert!(!classify(dec("50"), dec("20")).aflatoxin_risk);
    }
}

// ============================================================================
// Recommendation Tests
// ============================================================================

#[cfg(test)]
mod recommendation_tests {
    use super::*;

    /// The aflatoxin override wins over every tier template
    #[test]
    fn test_aflatoxin_override_has_priority() {
        let classification = classify(dec("80"), dec("32"));
        let (en, bn) = recommend(&classification, dec("80"), dec("32"));

        assert!(en.contains("aflatoxin"));
        assert!(bn.contains("আফলাটক্সিন"));
    }

    /// High tier without aflatoxin gets the moisture-damage template
    #[test]
    fn test_high_tier_moisture_template() {
        let classification = classify(dec("73"), dec("20"));
        let (en, _) = recommend(&classification, dec("73"), dec("20"));

        assert!(en.contains("moisture damage"));
        assert!(en.contains("73"));
    }

    #[test]
    fn test_medium_tier_monitoring_template() {
        let classification = classify(dec("67"), dec("24"));
        let (en, _) = recommend(&classification, dec("67"), dec("24"));

        assert!(en.contains("attention"));
    }

    #[test]
    fn test_low_tier_favorable_template() {
        let classification = classify(dec("55"), dec("22"));
        let (en, _) = recommend(&classification, dec("55"), dec("22"));

        assert!(en.contains("favorable"));
    }

    /// Recommendations embed the resolved numbers and the ETCL horizon
    #[test]
    fn test_recommendation_parameterization() {
        let classification = classify(dec("80"), dec("32"));
        let (en, bn) = recommend(&classification, dec("80"), dec("32"));

        assert!(en.contains("80"));
        assert!(en.contains("32"));
        assert!(en.contains(&classification.etcl_hours.to_string()));
        assert!(!bn.is_empty());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for moisture percentages
    fn moisture_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..=1000i64).prop_map(|n| Decimal::new(n, 1)) // 0.0 to 100.0
    }

    /// Strategy for temperatures
    fn temperature_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..=500i64).prop_map(|n| Decimal::new(n, 1)) // 0.0 to 50.0°C
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        /// The tier always matches the first satisfied rung of the ladder
        #[test]
        fn prop_tier_follows_ladder(
            moisture in moisture_strategy(),
            temp in temperature_strategy()
        ) {
            let result = classify(moisture, temp);

            let expected = if moisture > dec("75") && temp > dec("30") {
                RiskLevel::Critical
            } else if moisture > dec("70") || temp > dec("28") {
                RiskLevel::High
            } else if moisture > dec("65") || temp > dec("25") {
                RiskLevel::Medium
            } else {
                RiskLevel::Low
            };

            prop_assert_eq!(result.risk_level, expected);
        }

        /// The deterministic hour estimate sits inside its tier's band
        #[test]
        fn prop_hours_inside_tier_band(
            moisture in moisture_strategy(),
            temp in temperature_strategy()
        ) {
            let result = classify(moisture, temp);
            let band = result.risk_level.etcl_band();

            prop_assert!(result.etcl_hours >= Decimal::from(band.base_hours));
            prop_assert!(
                result.etcl_hours <= Decimal::from(band.base_hours + band.spread_hours)
            );
        }

        /// Tier and hour estimate never contradict each other: no low
        /// tier inside a sub-24h horizon
        #[test]
        fn prop_tier_and_hours_consistent(
            moisture in moisture_strategy(),
            temp in temperature_strategy()
        ) {
            let result = classify(moisture, temp);

            if result.risk_level == RiskLevel::Low {
                prop_assert!(result.etcl_hours >= dec("144"));
            }
            if result.risk_level == RiskLevel::Critical {
                prop_assert!(result.etcl_hours < dec("48"));
            }
        }

        /// Aflatoxin flag only ever fires on the critical tier
        /// (deterministic path)
        #[test]
        fn prop_aflatoxin_implies_critical(
            moisture in moisture_strategy(),
            temp in temperature_strategy()
        ) {
            let result = classify(moisture, temp);

            if result.aflatoxin_risk {
                prop_assert_eq!(result.risk_level, RiskLevel::Critical);
            }
        }

        /// Every classification yields non-empty bilingual text
        #[test]
        fn prop_recommendations_always_complete(
            moisture in moisture_strategy(),
            temp in temperature_strategy()
        ) {
            let result = classify(moisture, temp);
            let (label_en, label_bn) = etcl_label(result.etcl_hours);
            let (rec_en, rec_bn) = recommend(&result, moisture, temp);

            prop_assert!(!label_en.is_empty());
            prop_assert!(!label_bn.is_empty());
            prop_assert!(!rec_en.is_empty());
            prop_assert!(!rec_bn.is_empty());
        }
    }
}
