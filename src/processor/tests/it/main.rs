#![deny(warnings)]
#![deny(rust_2018_idioms)]

use config::{Config, File};
use processor::{Environment, LogLevel, Settings};
use std::time::Duration;

pub mod run;

fn load(name: &str, environment: &str) -> Settings {
    Config::builder()
        .add_source(File::with_name(name).required(true))
        .set_override("environment", environment)
        .unwrap()
        .build()
        .unwrap()
        .try_deserialize::<Settings>()
        .unwrap()
}

#[test]
fn test_local_settings_are_valid() {
    let settings = load("config/local.yml", "Local");

    assert_eq!(settings.environment, Environment::Local);
    assert_eq!(settings.log_level, LogLevel::Debug);
    settings.analytics.validate().unwrap();
    assert_eq!(settings.analytics, fleet_core::AnalyticsConfig::default());
    assert_eq!(
        settings.integration.join_tolerance,
        Duration::from_secs(3600)
    );
}

#[test]
fn test_test_settings_are_valid() {
    let settings = load("config/test.yml", "Test");

    settings.analytics.validate().unwrap();
    assert_eq!(
        settings.analytics.recency_weighting,
        fleet_core::RecencyWeighting::Exponential {
            half_life: Duration::from_secs(7 * 24 * 3600)
        }
    );
    assert_eq!(
        settings.integration.join_tolerance,
        Duration::from_secs(90 * 60)
    );
}

#[test]
fn test_production_settings_are_valid() {
    let settings = load("config/production.yml", "Production");

    settings.analytics.validate().unwrap();
    assert_eq!(settings.num_workers, 8);
}
