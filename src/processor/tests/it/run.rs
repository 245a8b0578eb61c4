use analytics::AnalysisOutput;
use fleet_core::{AnalyticsConfig, IntegrationConfig};
use processor::{
    App, Environment, FLEET_SUMMARY_FILE, LogLevel, Settings, VESSEL_METRICS_FILE,
};
use rand::random;
use std::path::PathBuf;

fn settings(output_dir: PathBuf) -> Settings {
    Settings {
        log_level: LogLevel::Info,
        environment: Environment::Test,
        data_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("data")
            .join("complete"),
        output_dir,
        num_workers: 2,
        analytics: AnalyticsConfig::default(),
        integration: IntegrationConfig::default(),
    }
}

fn output_dir() -> PathBuf {
    std::env::temp_dir().join(format!("fleet-analytics-{}", random::<u64>()))
}

async fn run(settings: &Settings) -> AnalysisOutput {
    App::build(settings).unwrap().run().await.unwrap()
}

#[tokio::test]
async fn test_run_writes_metrics_and_summary() {
    let dir = output_dir();
    let output = run(&settings(dir.clone())).await;

    let metrics: serde_json::Value =
        serde_json::from_reader(std::fs::File::open(dir.join(VESSEL_METRICS_FILE)).unwrap())
            .unwrap();
    let summary: serde_json::Value =
        serde_json::from_reader(std::fs::File::open(dir.join(FLEET_SUMMARY_FILE)).unwrap())
            .unwrap();

    assert_eq!(metrics.as_array().unwrap().len(), 3);
    assert_eq!(output.vessels.len(), 3);
    assert_eq!(summary["summary"]["total_vessels"], 3);
    assert!(summary["diagnostics"].is_object());

    std::fs::remove_dir_all(dir).unwrap();
}

#[tokio::test]
async fn test_run_reports_integration_and_engine_diagnostics() {
    let dir = output_dir();
    let output = run(&settings(dir.clone())).await;

    // One navigation event of an unknown vessel, one incident of an unknown vessel.
    assert_eq!(output.diagnostics.unresolved_vessel_rows, 1);
    assert_eq!(output.diagnostics.orphaned_incidents, 1);
    // V003 has no navigation at all and stays unscored.
    assert_eq!(output.summary.category_counts.unscored, 1);

    std::fs::remove_dir_all(dir).unwrap();
}

#[test]
fn test_invalid_analytics_config_fails_before_loading() {
    let mut settings = settings(output_dir());
    settings.analytics.max_plausible_speed_knots = 0.0;

    assert!(App::build(&settings).is_err());
}
