use config::{Config, ConfigError, File};
use fleet_core::{AnalyticsConfig, IntegrationConfig};
use serde::Deserialize;
use std::path::PathBuf;
use strum::{AsRefStr, EnumString};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub log_level: LogLevel,
    pub environment: Environment,
    /// Directory holding the input CSV files.
    pub data_dir: PathBuf,
    /// Directory the JSON results are written to, created if missing.
    pub output_dir: PathBuf,
    pub num_workers: usize,
    #[serde(default)]
    pub analytics: AnalyticsConfig,
    #[serde(default)]
    pub integration: IntegrationConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, AsRefStr, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Environment {
    Local,
    Test,
    Development,
    Production,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, AsRefStr, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Settings {
    /// Reads `config/<environment>.yml` with `FLEET_ANALYTICS__*` overrides, the
    /// environment is taken from `APP_ENVIRONMENT` and defaults to `Local`.
    pub fn new() -> Result<Self, ConfigError> {
        let environment = match std::env::var("APP_ENVIRONMENT") {
            Ok(v) => v
                .parse::<Environment>()
                .map_err(|e| ConfigError::Message(format!("APP_ENVIRONMENT '{v}': {e}")))?,
            Err(_) => Environment::Local,
        };

        Config::builder()
            .add_source(
                File::with_name(&format!("config/{}", environment.as_ref().to_lowercase()))
                    .required(true),
            )
            .add_source(config::Environment::with_prefix("FLEET_ANALYTICS").separator("__"))
            .set_override("environment", environment.as_ref())?
            .build()?
            .try_deserialize()
    }
}

impl From<&LogLevel> for tracing::Level {
    fn from(value: &LogLevel) -> Self {
        match value {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}
