use crate::helper::{approx_eq, run, run_with, vessel};
use chrono::Duration;
use fleet_core::{
    AnalyticsConfig, RecencyWeighting, RiskFactorId, test_helper::TestStateBuilder,
};

fn sub_score(output: &analytics::AnalysisOutput, id: &str, factor: RiskFactorId) -> Option<f64> {
    vessel(output, id)
        .risk
        .as_ref()
        .and_then(|r| r.factor(factor))
        .and_then(|f| f.sub_score)
}

#[test]
fn test_fuel_anomaly_only_penalizes_below_mean_efficiency() {
    let state = TestStateBuilder::default()
        .vessels(3)
        .rows(0, 2)
        .with_fuel(5.0)
        .rows(1, 2)
        .with_fuel(5.0)
        .rows(2, 2)
        .with_fuel(10.0)
        .build();

    let output = run(&state.input());

    // Efficiencies 2, 2 and 1: mean 5/3, population std dev sqrt(2)/3.
    let expected = (5.0 / 3.0 - 1.0) / (2.0_f64.sqrt() / 3.0) * 25.0;
    let v3 = sub_score(&output, "V003", RiskFactorId::FuelEfficiencyAnomaly).unwrap();

    assert!((v3 - expected).abs() < 1e-6);
    assert_eq!(
        sub_score(&output, "V001", RiskFactorId::FuelEfficiencyAnomaly),
        Some(0.0)
    );
}

#[test]
fn test_fuel_anomaly_is_zero_when_fleet_efficiency_is_uniform() {
    let state = TestStateBuilder::default()
        .vessels(2)
        .rows(0, 3)
        .with_fuel(5.0)
        .rows(1, 3)
        .with_fuel(5.0)
        .build();

    let output = run(&state.input());

    for id in ["V001", "V002"] {
        assert_eq!(
            sub_score(&output, id, RiskFactorId::FuelEfficiencyAnomaly),
            Some(0.0)
        );
    }
}

#[test]
fn test_fuel_anomaly_is_undefined_for_a_single_vessel_fleet() {
    let state = TestStateBuilder::default()
        .vessels(1)
        .rows(0, 3)
        .with_fuel(5.0)
        .build();

    let output = run(&state.input());
    let risk = vessel(&output, "V001").risk.as_ref().unwrap();

    assert_eq!(
        risk.factor(RiskFactorId::FuelEfficiencyAnomaly)
            .unwrap()
            .applied_weight,
        0.0
    );
    assert!(approx_eq(risk.applied_weight_total(), 1.0));
}

#[test]
fn test_environmental_exposure_rises_with_adverse_conditions() {
    let state = TestStateBuilder::default()
        .vessels(2)
        .rows(0, 4)
        .with_environment(5.0, 80.0)
        .rows(1, 4)
        .with_environment(1.0, 10.0)
        .build();

    let output = run(&state.input());
    let rough = vessel(&output, "V001");
    let calm = vessel(&output, "V002");

    assert_eq!(rough.adverse_environment_samples, 4);
    assert_eq!(calm.adverse_environment_samples, 0);
    assert!(
        sub_score(&output, "V001", RiskFactorId::EnvironmentalExposure).unwrap()
            > sub_score(&output, "V002", RiskFactorId::EnvironmentalExposure).unwrap()
    );
}

#[test]
fn test_vessel_without_environment_context_has_undefined_exposure() {
    let state = TestStateBuilder::default().vessels(1).rows(0, 4).build();

    let output = run(&state.input());

    assert_eq!(
        sub_score(&output, "V001", RiskFactorId::EnvironmentalExposure),
        None
    );
    assert_eq!(vessel(&output, "V001").environmental_exposure, None);
}

#[test]
fn test_maintenance_urgency_decays_with_incident_age() {
    let builder = TestStateBuilder::default();
    let start = builder.start();
    let state = builder
        .vessels(2)
        .rows(0, 2)
        .incidents(0, 1)
        .rows(1, 2)
        .incidents(1, 1)
        .modify(|i| i.timestamp -= Duration::days(15))
        .build();

    let output = run(&state.input().with_as_of(start + Duration::hours(1)));

    // Severity 5, 10 points per severity, linear weight 1 and 0.5.
    assert_eq!(
        sub_score(&output, "V001", RiskFactorId::MaintenanceUrgency),
        Some(50.0)
    );
    assert_eq!(
        sub_score(&output, "V002", RiskFactorId::MaintenanceUrgency),
        Some(25.0)
    );
}

#[test]
fn test_uniform_recency_weighting_ignores_incident_age() {
    let config = AnalyticsConfig {
        recency_weighting: RecencyWeighting::Uniform,
        ..Default::default()
    };
    let state = TestStateBuilder::default()
        .vessels(1)
        .rows(0, 2)
        .incidents(0, 2)
        .modify_idx(|i, v| v.timestamp -= Duration::days(10 * i as i64))
        .build();

    let output = run_with(config, &state.input());

    assert_eq!(
        sub_score(&output, "V001", RiskFactorId::MaintenanceUrgency),
        Some(100.0)
    );
}

#[test]
fn test_observed_vessel_without_incidents_has_zero_urgency() {
    let state = TestStateBuilder::default().vessels(2).rows(0, 3).build();

    let output = run(&state.input());

    assert_eq!(
        sub_score(&output, "V001", RiskFactorId::MaintenanceUrgency),
        Some(0.0)
    );
    assert!(vessel(&output, "V002").risk.is_none());
}

#[test]
fn test_operational_strain_is_zero_below_threshold() {
    let state = TestStateBuilder::default()
        .vessels(1)
        .rows(0, 5)
        .modify_idx(|i, r| {
            if i % 2 == 1 {
                r.navigation.speed_knots = 0.0;
            }
        })
        .build();

    let output = run(&state.input());

    assert_eq!(vessel(&output, "V001").utilization_ratio, Some(0.5));
    assert_eq!(
        sub_score(&output, "V001", RiskFactorId::OperationalStrain),
        Some(0.0)
    );
}
