//! Behavioural coverage for normalisation, severity ratios and colouring.

use std::cell::RefCell;

use geo::Coord;
use healthmap_core::{
    Entity, InvalidMetricError, MetricKind, RegionMetrics, color_for, normalize, severity_ratios,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

/// Per-key values in A, B, C order.
type Triple<T> = [T; 3];

struct Coloured {
    scores: Triple<u8>,
    ratios: Triple<f64>,
    lightness: Triple<f64>,
}

/// Shared state for one scenario run.
pub struct TestContext {
    entities: RefCell<Vec<Entity>>,
    outcome: RefCell<Option<Result<Coloured, InvalidMetricError>>>,
}

#[fixture]
/// Build an empty context for each scenario.
pub fn context() -> TestContext {
    TestContext {
        entities: RefCell::new(Vec::new()),
        outcome: RefCell::new(None),
    }
}

fn region(key: &str, metrics: RegionMetrics) -> Entity {
    Entity::new(key, format!("Region {key}"), metrics, Coord { x: 0.0, y: 0.0 })
}

fn with_hospitals(context: &TestContext, counts: Triple<u32>) {
    let entities = ["A", "B", "C"]
        .into_iter()
        .zip(counts)
        .map(|(key, hospitals)| {
            region(
                key,
                RegionMetrics {
                    facility_count_a: hospitals,
                    climate: "Temperate".into(),
                    ..RegionMetrics::default()
                },
            )
        })
        .collect();
    *context.entities.borrow_mut() = entities;
}

fn colour_by(context: &TestContext, metric: MetricKind) {
    let entities = context.entities.borrow();
    let outcome = normalize(&entities, metric).and_then(|scores| {
        let ratios = severity_ratios(&entities, metric)?;
        let pick = |key: &str| {
            let ratio = ratios.get(key).expect("ratio for every key").get();
            (
                scores.get(key).expect("score for every key").get(),
                ratio,
                color_for(ratio, metric).lightness,
            )
        };
        let [a, b, c] = ["A", "B", "C"].map(pick);
        Ok(Coloured {
            scores: [a.0, b.0, c.0],
            ratios: [a.1, b.1, c.1],
            lightness: [a.2, b.2, c.2],
        })
    });
    *context.outcome.borrow_mut() = Some(outcome);
}

fn with_outcome(context: &TestContext, check: impl FnOnce(&Coloured)) {
    let outcome = context.outcome.borrow();
    let coloured = outcome
        .as_ref()
        .expect("regions should have been coloured")
        .as_ref()
        .expect("colouring should succeed");
    check(coloured);
}

fn assert_close(actual: Triple<f64>, expected: Triple<f64>) {
    for (a, e) in actual.into_iter().zip(expected) {
        assert!((a - e).abs() < 1e-9, "expected {expected:?}, got {actual:?}");
    }
}

#[given("regions A, B and C with 10, 30 and 20 hospitals")]
fn spread_hospitals(context: &TestContext) {
    with_hospitals(context, [10, 30, 20]);
}

#[given("regions A, B and C with 7, 7 and 7 hospitals")]
fn equal_hospitals(context: &TestContext) {
    with_hospitals(context, [7, 7, 7]);
}

#[given("regions A, B and C with 0, 4 and 2 health alerts")]
fn spread_alerts(context: &TestContext) {
    let entities = ["A", "B", "C"]
        .into_iter()
        .zip([0_usize, 4, 2])
        .map(|(key, count)| {
            region(
                key,
                RegionMetrics {
                    alerts: vec!["Heat advisory".to_owned(); count],
                    ..RegionMetrics::default()
                },
            )
        })
        .collect();
    *context.entities.borrow_mut() = entities;
}

#[when("I colour the regions by hospitals")]
fn colour_by_hospitals(context: &TestContext) {
    colour_by(context, MetricKind::FacilityCountA);
}

#[when("I colour the regions by health alerts")]
fn colour_by_alerts(context: &TestContext) {
    colour_by(context, MetricKind::DerivedAlertCount);
}

#[when("I colour the regions by climate")]
fn colour_by_climate(context: &TestContext) {
    colour_by(context, MetricKind::Categorical);
}

#[then("the normalised scores are 0, 100 and 50")]
fn scores_spread(context: &TestContext) {
    with_outcome(context, |c| assert_eq!(c.scores, [0, 100, 50]));
}

#[then("the normalised scores are 50, 50 and 50")]
fn scores_flat(context: &TestContext) {
    with_outcome(context, |c| assert_eq!(c.scores, [50, 50, 50]));
}

#[then("the severity ratios are 1, 0 and 0.5")]
fn ratios_inverted(context: &TestContext) {
    with_outcome(context, |c| assert_close(c.ratios, [1.0, 0.0, 0.5]));
}

#[then("the severity ratios are 0, 1 and 0.5")]
fn ratios_direct(context: &TestContext) {
    with_outcome(context, |c| assert_close(c.ratios, [0.0, 1.0, 0.5]));
}

#[then("the severity ratios are 0.5, 0.5 and 0.5")]
fn ratios_flat(context: &TestContext) {
    with_outcome(context, |c| assert_close(c.ratios, [0.5, 0.5, 0.5]));
}

#[then("the lightness values are 35, 85 and 60")]
fn lightness_inverted(context: &TestContext) {
    with_outcome(context, |c| assert_close(c.lightness, [35.0, 85.0, 60.0]));
}

#[then("the lightness values are 85, 35 and 60")]
fn lightness_direct(context: &TestContext) {
    with_outcome(context, |c| assert_close(c.lightness, [85.0, 35.0, 60.0]));
}

#[then("an invalid metric error names climate")]
fn invalid_metric(context: &TestContext) {
    let outcome = context.outcome.borrow();
    let Some(Err(err)) = outcome.as_ref() else {
        panic!("expected an invalid metric error");
    };
    assert_eq!(err.metric, MetricKind::Categorical);
}

#[scenario(path = "tests/features/severity.feature", index = 0)]
fn hospitals_invert_severity(context: TestContext) {
    let _ = context;
}

#[scenario(path = "tests/features/severity.feature", index = 1)]
fn alerts_keep_severity(context: TestContext) {
    let _ = context;
}

#[scenario(path = "tests/features/severity.feature", index = 2)]
fn identical_values_use_midpoint(context: TestContext) {
    let _ = context;
}

#[scenario(path = "tests/features/severity.feature", index = 3)]
fn climate_is_rejected(context: TestContext) {
    let _ = context;
}
