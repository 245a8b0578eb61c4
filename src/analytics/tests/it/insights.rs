use crate::helper::run;
use fleet_core::{MetricId, RiskCategory, test_helper::TestStateBuilder};

#[test]
fn test_category_counts_cover_every_vessel() {
    let state = TestStateBuilder::default()
        .vessels(4)
        .rows(0, 5)
        .rows(1, 5)
        .incidents(1, 1)
        .modify(|i| i.severity = 10.0)
        .build();

    let output = run(&state.input());
    let counts = output.summary.category_counts;

    assert_eq!(counts.scored() + counts.unscored, 4);
    assert_eq!(counts.unscored, 2);
    assert_eq!(counts.get(RiskCategory::Critical), 1);
}

#[test]
fn test_metric_statistics_exclude_vessels_without_data() {
    let state = TestStateBuilder::default()
        .vessels(3)
        .rows(0, 2)
        .modify(|r| r.navigation.speed_knots = 4.0)
        .rows(1, 2)
        .modify(|r| r.navigation.speed_knots = 8.0)
        .build();

    let output = run(&state.input());
    let speed = output.summary.metric(MetricId::AvgSpeed).unwrap();

    assert_eq!(speed.count, 2);
    assert_eq!(speed.excluded, 1);
    assert_eq!(speed.mean, Some(6.0));
    assert_eq!(speed.median, Some(6.0));

    let fuel = output.summary.metric(MetricId::FuelEfficiency).unwrap();
    assert_eq!(fuel.count, 0);
    assert_eq!(fuel.mean, None);
}

#[test]
fn test_summary_lists_every_metric() {
    let output = run(&TestStateBuilder::default().vessels(1).build().input());
    assert_eq!(output.summary.metrics.len(), 14);
}

#[test]
fn test_flagged_vessels_are_ordered_by_score() {
    let state = TestStateBuilder::default()
        .vessels(3)
        .rows(0, 2)
        .incidents(0, 1)
        .modify(|i| i.severity = 6.0)
        .rows(1, 2)
        .incidents(1, 1)
        .modify(|i| i.severity = 9.0)
        .rows(2, 2)
        .build();

    let output = run(&state.input());

    assert_eq!(
        output.summary.flagged_ids().map(|v| v.as_str()).collect::<Vec<_>>(),
        vec!["V002", "V001"]
    );
}
