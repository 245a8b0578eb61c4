use crate::helper::{approx_eq, run, run_with, vessel};
use analytics::{AnalyticsEngine, Error};
use chrono::Duration;
use fleet_core::{
    AnalyticsConfig, RiskCategory, RiskThresholds,
    test_helper::{TestStateBuilder, test_incident},
};

#[test]
fn test_fuel_efficiency_is_distance_over_fuel() {
    let state = TestStateBuilder::default()
        .vessels(2)
        .rows(0, 10)
        .modify(|r| r.navigation.distance_nm = 100.0)
        .with_fuel(50.0)
        .rows(1, 10)
        .build();

    let output = run(&state.input());

    assert_eq!(vessel(&output, "V001").total_distance_nm, Some(1000.0));
    assert_eq!(vessel(&output, "V001").total_fuel_liters, Some(500.0));
    assert_eq!(
        vessel(&output, "V001").fuel_efficiency_nm_per_liter,
        Some(2.0)
    );
    assert_eq!(vessel(&output, "V002").fuel_efficiency_nm_per_liter, None);
    assert_eq!(vessel(&output, "V002").total_fuel_liters, None);
}

#[test]
fn test_severe_recent_incident_scores_higher() {
    let state = TestStateBuilder::default()
        .vessels(3)
        .rows(0, 10)
        .modify(|r| r.navigation.distance_nm = 100.0)
        .with_fuel(50.0)
        .rows(1, 10)
        .rows(2, 10)
        .incidents(2, 1)
        .modify(|i| i.severity = 9.0)
        .build();

    let output = run(&state.input());
    let v1 = vessel(&output, "V001").risk_score().unwrap();
    let v3 = vessel(&output, "V003").risk_score().unwrap();

    assert!(v3 > v1);
    assert_eq!(
        vessel(&output, "V003").risk_category(),
        Some(RiskCategory::Critical)
    );
    assert_eq!(
        output.summary.flagged_ids().map(|v| v.as_str()).collect::<Vec<_>>(),
        vec!["V003"]
    );
}

#[test]
fn test_vessels_without_rows_get_no_data_entries() {
    let state = TestStateBuilder::default().vessels(5).build();

    let output = run(&state.input());

    assert_eq!(output.vessels.len(), 5);
    assert_eq!(output.summary.total_vessels, 5);
    assert!(output.vessels.iter().all(|v| v.risk.is_none()
        && v.avg_speed_knots.is_none()
        && v.fuel_efficiency_nm_per_liter.is_none()));
    assert_eq!(output.summary.category_counts.scored(), 0);
    assert_eq!(output.summary.category_counts.unscored, 5);
    assert!(output.summary.flagged.is_empty());
    assert_eq!(output.as_of, None);
}

#[test]
fn test_output_has_one_entry_per_vessel_ordered_by_id() {
    let state = TestStateBuilder::default()
        .vessels(12)
        .rows(7, 3)
        .rows(2, 4)
        .build();

    let output = run(&state.shuffled_input(7));

    let ids = output
        .vessels
        .iter()
        .map(|v| v.vessel_id.clone())
        .collect::<Vec<_>>();
    let mut expected = state
        .vessels
        .iter()
        .map(|v| v.vessel_id.clone())
        .collect::<Vec<_>>();
    expected.sort();

    assert_eq!(ids, expected);
}

#[test]
fn test_output_is_independent_of_input_order() {
    let state = TestStateBuilder::default()
        .row_gap(Duration::minutes(37))
        .vessels(6)
        .rows(0, 40)
        .modify_idx(|i, r| {
            r.navigation.speed_knots = (i % 7) as f64 * 3.3;
            r.navigation.distance_nm = 0.1 * i as f64 + 0.7;
        })
        .with_fuel(13.7)
        .rows(1, 25)
        .modify_idx(|i, r| r.navigation.distance_nm = 1.0 / (i + 1) as f64)
        .with_fuel(3.3)
        .with_environment(4.5, 70.0)
        .rows(2, 30)
        .with_environment(1.3, 12.5)
        .rows(3, 18)
        .with_fuel(0.9)
        .incidents(3, 4)
        .modify_idx(|i, v| v.severity = 1.5 + i as f64)
        .rows(4, 2)
        .incidents(4, 2)
        .build();

    let expected = run(&state.input());

    for seed in 0..10 {
        assert_eq!(run(&state.shuffled_input(seed)), expected);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_run_matches_sequential_run() {
    let state = TestStateBuilder::default()
        .vessels(20)
        .rows(0, 15)
        .with_fuel(7.0)
        .rows(3, 15)
        .with_fuel(2.5)
        .with_environment(6.0, 90.0)
        .rows(11, 8)
        .incidents(11, 3)
        .rows(19, 5)
        .with_fuel(11.0)
        .build();

    let input = state.shuffled_input(42);
    let engine = AnalyticsEngine::new(AnalyticsConfig::default()).unwrap();

    let sequential = engine.run(&input);
    for num_workers in [1, 3, 64] {
        let parallel = engine.run_parallel(&input, num_workers).await.unwrap();
        assert_eq!(parallel, sequential);
    }
}

#[tokio::test]
async fn test_parallel_run_handles_empty_input() {
    let engine = AnalyticsEngine::new(AnalyticsConfig::default()).unwrap();
    let input = TestStateBuilder::default().build().input();

    let output = engine.run_parallel(&input, 4).await.unwrap();

    assert!(output.vessels.is_empty());
    assert_eq!(output.summary.total_vessels, 0);
}

#[test]
fn test_rows_of_unknown_vessels_are_excluded_and_counted() {
    let state = TestStateBuilder::default()
        .vessels(1)
        .rows(0, 2)
        .unknown_vessel_rows("V999", 3)
        .build();

    let output = run(&state.input());

    assert_eq!(output.vessels.len(), 1);
    assert_eq!(vessel(&output, "V001").navigation_events, 2);
    assert_eq!(output.diagnostics.unresolved_vessel_rows, 3);
    assert_eq!(
        output
            .diagnostics
            .unresolved_vessel_ids
            .iter()
            .map(|v| v.as_str())
            .collect::<Vec<_>>(),
        vec!["V999"]
    );
}

#[test]
fn test_orphaned_incidents_and_duplicate_vessels_are_counted() {
    let state = TestStateBuilder::default().vessels(2).rows(0, 2).build();
    let mut input = state.input();
    input.vessels.push(input.vessels[1].clone());
    input
        .incidents
        .push(test_incident("V404".into(), TestStateBuilder::default().start()));

    let output = run(&input);

    assert_eq!(output.vessels.len(), 2);
    assert_eq!(output.diagnostics.duplicate_vessel_records, 1);
    assert_eq!(output.diagnostics.orphaned_incidents, 1);
}

#[test]
fn test_implausible_speeds_are_reported_in_diagnostics() {
    let state = TestStateBuilder::default()
        .vessels(1)
        .rows(0, 4)
        .modify_idx(|i, r| {
            if i % 2 == 0 {
                r.navigation.speed_knots = 250.0;
            }
        })
        .build();

    let output = run(&state.input());

    assert_eq!(output.diagnostics.implausible_speed_samples, 2);
    assert_eq!(vessel(&output, "V001").max_speed_knots, Some(10.0));
}

#[test]
fn test_explicit_as_of_drives_the_trailing_window() {
    let builder = TestStateBuilder::default();
    let start = builder.start();
    let state = builder.vessels(1).rows(0, 2).incidents(0, 1).build();

    let recent = run(&state.input());
    let later = run(&state.input().with_as_of(start + Duration::days(60)));

    assert_eq!(vessel(&recent, "V001").maintenance_frequency, Some(1.0));
    assert_eq!(vessel(&later, "V001").maintenance_frequency, Some(0.0));
    assert!(
        vessel(&later, "V001").risk_score().unwrap()
            < vessel(&recent, "V001").risk_score().unwrap()
    );
}

#[test]
fn test_score_exactly_on_threshold_takes_higher_category() {
    let mut config = AnalyticsConfig::default();
    config.weights.maintenance_urgency = 0.0;
    config.weights.fuel_efficiency_anomaly = 0.0;
    config.weights.environmental_exposure = 0.0;
    config.weights.operational_strain = 1.0;
    config.high_utilization_threshold = 0.5;

    let state = TestStateBuilder::default()
        .vessels(1)
        .rows(0, 5)
        .modify_idx(|i, r| {
            if i == 3 {
                r.navigation.speed_knots = 0.0;
            }
        })
        .build();

    let output = run_with(config, &state.input());
    let v = vessel(&output, "V001");

    assert_eq!(v.utilization_ratio, Some(0.75));
    assert_eq!(v.risk_score(), Some(50.0));
    assert_eq!(v.risk_category(), Some(RiskCategory::High));
}

#[test]
fn test_invalid_config_is_rejected_before_running() {
    let config = AnalyticsConfig {
        thresholds: RiskThresholds {
            medium: 60.0,
            high: 50.0,
            critical: 75.0,
        },
        ..Default::default()
    };

    let err = AnalyticsEngine::new(config).err().unwrap();
    assert!(matches!(err, Error::Config { .. }));
}

#[test]
fn test_risk_scores_stay_within_bounds() {
    let state = TestStateBuilder::default()
        .vessels(4)
        .rows(0, 10)
        .with_environment(30.0, 400.0)
        .with_fuel(0.001)
        .incidents(0, 50)
        .modify(|i| i.severity = 1_000.0)
        .rows(1, 10)
        .with_fuel(1_000.0)
        .rows(2, 10)
        .with_fuel(1_000.0)
        .rows(3, 10)
        .with_fuel(1_000.0)
        .build();

    let output = run(&state.input());

    for v in &output.vessels {
        let risk = v.risk.as_ref().unwrap();
        assert!((0.0..=100.0).contains(&risk.score));
        assert!(approx_eq(risk.applied_weight_total(), 1.0));
        for f in &risk.factors {
            if let Some(s) = f.sub_score {
                assert!((0.0..=100.0).contains(&s));
            }
        }
    }
}
