//! Property-based tests for normalisation, severity and colour mapping.
//!
//! # Invariants tested
//!
//! - **Midpoint:** constant metrics normalise to exactly 50.
//! - **Bounds:** every normalised score lies in `0..=100`.
//! - **Lightness:** `lightness(r) == 85 - 50r` on `0..=1` and never increases.
//! - **Clamping:** out-of-range ratios behave like the nearest bound.
//! - **Polarity:** raising a raw value moves severity in the metric's direction.

use geo::Coord;
use healthmap_core::{
    Entity, MetricKind, NormalizedScore, RegionMetrics, SeverityDirection, color_for,
    lightness_for, normalize, severity_ratios,
};
use proptest::prelude::*;

fn entity(key: usize, hospitals: u32, alerts: usize) -> Entity {
    Entity::new(
        format!("region-{key:02}"),
        format!("Region {key}"),
        RegionMetrics {
            facility_count_a: hospitals,
            alerts: vec!["alert".to_owned(); alerts],
            ..RegionMetrics::default()
        },
        Coord { x: 0.0, y: 0.0 },
    )
}

fn entities_strategy() -> impl Strategy<Value = Vec<Entity>> {
    proptest::collection::vec((0_u32..5_000, 0_usize..6), 1..12).prop_map(|values| {
        values
            .into_iter()
            .enumerate()
            .map(|(idx, (hospitals, alerts))| entity(idx, hospitals, alerts))
            .collect()
    })
}

fn ratio_of(entities: &[Entity], metric: MetricKind, key: &str) -> f64 {
    severity_ratios(entities, metric)
        .ok()
        .and_then(|ratios| ratios.get(key).map(|r| r.get()))
        .unwrap_or(f64::NAN)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn constant_metric_scores_midpoint(count in 1_usize..20, hospitals in 0_u32..10_000) {
        let entities: Vec<_> = (0..count).map(|idx| entity(idx, hospitals, 0)).collect();
        let scores = normalize(&entities, MetricKind::FacilityCountA)?;
        prop_assert_eq!(scores.len(), count);
        prop_assert!(scores.values().all(|s| *s == NormalizedScore::MIDPOINT));
    }

    #[test]
    fn scores_stay_within_bounds(entities in entities_strategy()) {
        for metric in [MetricKind::FacilityCountA, MetricKind::DerivedAlertCount] {
            let scores = normalize(&entities, metric)?;
            prop_assert_eq!(scores.len(), entities.len());
            prop_assert!(scores.values().all(|s| s.get() <= 100));
        }
    }

    #[test]
    fn lightness_is_linear_in_range(ratio in 0.0_f64..=1.0) {
        let expected = 85.0 - 50.0 * ratio;
        prop_assert!((lightness_for(ratio) - expected).abs() < 1e-9);
    }

    #[test]
    fn lightness_never_increases(a in 0.0_f64..=1.0, b in 0.0_f64..=1.0) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(lightness_for(high) <= lightness_for(low));
    }

    #[test]
    fn out_of_range_ratios_clamp(excess in 0.000_001_f64..1_000.0) {
        for metric in MetricKind::ALL {
            prop_assert_eq!(color_for(-excess, metric), color_for(0.0, metric));
            prop_assert_eq!(color_for(1.0 + excess, metric), color_for(1.0, metric));
        }
    }

    #[test]
    fn raising_value_follows_polarity(
        entities in entities_strategy(),
        pick in any::<prop::sample::Index>(),
        bump in 1_u32..1_000,
        extra_alerts in 1_usize..4,
    ) {
        let idx = pick.index(entities.len());
        let key = entities[idx].key.clone();

        let before_better = ratio_of(&entities, MetricKind::FacilityCountA, &key);
        let before_worse = ratio_of(&entities, MetricKind::DerivedAlertCount, &key);

        let mut raised = entities.clone();
        raised[idx].metrics.facility_count_a = raised[idx].metrics.facility_count_a.saturating_add(bump);
        raised[idx]
            .metrics
            .alerts
            .extend(std::iter::repeat_n("alert".to_owned(), extra_alerts));

        let after_better = ratio_of(&raised, MetricKind::FacilityCountA, &key);
        let after_worse = ratio_of(&raised, MetricKind::DerivedAlertCount, &key);

        prop_assert!(after_better <= before_better);
        prop_assert!(after_worse >= before_worse);
    }

    #[test]
    fn directions_are_complementary(score in 0_u8..=100) {
        let score = NormalizedScore::new(score);
        let worse = SeverityDirection::HigherIsWorse.ratio(score).get();
        let better = SeverityDirection::HigherIsBetter.ratio(score).get();
        prop_assert!((worse + better - 1.0).abs() < 1e-9);
    }
}
