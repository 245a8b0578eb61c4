use crate::{
    Result, RiskCategory, RiskFactorId,
    error::error::{
        InvalidWeightSnafu, OutOfRangeSnafu, ThresholdsSnafu, WeightSumSnafu, ZeroDurationSnafu,
    },
};
use serde::{Deserialize, Serialize};
use snafu::ensure;
use std::time::Duration;
use tracing::debug;

static SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Tunables of the metrics and risk engine.
///
/// Every field has a default, so a partially specified configuration file only
/// overrides what it names. The value must pass [`AnalyticsConfig::validate`]
/// before the engine accepts it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub weights: RiskWeights,
    pub thresholds: RiskThresholds,
    /// Speeds above this are considered sensor faults and excluded.
    pub max_plausible_speed_knots: f64,
    /// Intervals starting at an event faster than this count as active navigation.
    pub active_speed_knots: f64,
    /// Utilization ratio above which operational strain accrues.
    pub high_utilization_threshold: f64,
    #[serde(with = "humantime_serde")]
    pub trailing_window: Duration,
    pub recency_weighting: RecencyWeighting,
    /// Maintenance urgency points per unit of recency-weighted severity.
    pub maintenance_points_per_severity: f64,
    /// Fuel anomaly points per standard deviation below the fleet mean.
    pub anomaly_points_per_std_dev: f64,
    pub adverse_environment: AdverseEnvironmentLimits,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskWeights {
    pub maintenance_urgency: f64,
    pub fuel_efficiency_anomaly: f64,
    pub environmental_exposure: f64,
    pub operational_strain: f64,
}

/// Lower bounds of the Medium, High and Critical categories. A score equal to a
/// bound belongs to the higher category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskThresholds {
    pub medium: f64,
    pub high: f64,
    pub critical: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecencyWeighting {
    /// Every incident in the window counts fully.
    Uniform,
    /// Weight decays linearly from 1 at `as_of` to 0 at the window edge.
    #[default]
    Linear,
    /// Weight halves every `half_life`.
    Exponential {
        #[serde(with = "humantime_serde")]
        half_life: Duration,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdverseEnvironmentLimits {
    pub wave_height_meters: f64,
    pub wind_speed_knots: f64,
    pub storm_risk_index: f64,
}

/// Settings of the record integrator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegrationConfig {
    /// Maximum time distance between a navigation event and its joined context.
    #[serde(with = "humantime_serde")]
    pub join_tolerance: Duration,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            weights: RiskWeights::default(),
            thresholds: RiskThresholds::default(),
            max_plausible_speed_knots: 50.0,
            active_speed_knots: 0.5,
            high_utilization_threshold: 0.8,
            trailing_window: Duration::from_secs(30 * SECONDS_PER_DAY),
            recency_weighting: RecencyWeighting::Linear,
            maintenance_points_per_severity: 10.0,
            anomaly_points_per_std_dev: 25.0,
            adverse_environment: AdverseEnvironmentLimits::default(),
        }
    }
}

impl Default for RiskWeights {
    fn default() -> Self {
        Self {
            maintenance_urgency: 0.35,
            fuel_efficiency_anomaly: 0.25,
            environmental_exposure: 0.20,
            operational_strain: 0.20,
        }
    }
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            medium: 25.0,
            high: 50.0,
            critical: 75.0,
        }
    }
}

impl Default for AdverseEnvironmentLimits {
    fn default() -> Self {
        Self {
            wave_height_meters: 4.0,
            wind_speed_knots: 34.0,
            storm_risk_index: 60.0,
        }
    }
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        Self {
            join_tolerance: Duration::from_secs(60 * 60),
        }
    }
}

impl AnalyticsConfig {
    pub fn validate(&self) -> Result<()> {
        self.weights.validate()?;
        self.thresholds.validate()?;

        positive("max_plausible_speed_knots", self.max_plausible_speed_knots)?;
        ensure!(
            self.active_speed_knots.is_finite() && self.active_speed_knots >= 0.0,
            OutOfRangeSnafu {
                name: "active_speed_knots",
                value: self.active_speed_knots,
            }
        );
        ensure!(
            (0.0..1.0).contains(&self.high_utilization_threshold),
            OutOfRangeSnafu {
                name: "high_utilization_threshold",
                value: self.high_utilization_threshold,
            }
        );
        ensure!(
            !self.trailing_window.is_zero(),
            ZeroDurationSnafu {
                name: "trailing_window"
            }
        );
        if let RecencyWeighting::Exponential { half_life } = self.recency_weighting {
            ensure!(!half_life.is_zero(), ZeroDurationSnafu { name: "half_life" });
        }
        positive(
            "maintenance_points_per_severity",
            self.maintenance_points_per_severity,
        )?;
        positive("anomaly_points_per_std_dev", self.anomaly_points_per_std_dev)?;

        let limits = &self.adverse_environment;
        positive("adverse_environment.wave_height_meters", limits.wave_height_meters)?;
        positive("adverse_environment.wind_speed_knots", limits.wind_speed_knots)?;
        positive("adverse_environment.storm_risk_index", limits.storm_risk_index)?;

        Ok(())
    }

    pub fn trailing_window_days(&self) -> f64 {
        self.trailing_window.as_secs_f64() / SECONDS_PER_DAY as f64
    }
}

impl RiskWeights {
    pub fn get(&self, factor: RiskFactorId) -> f64 {
        match factor {
            RiskFactorId::MaintenanceUrgency => self.maintenance_urgency,
            RiskFactorId::FuelEfficiencyAnomaly => self.fuel_efficiency_anomaly,
            RiskFactorId::EnvironmentalExposure => self.environmental_exposure,
            RiskFactorId::OperationalStrain => self.operational_strain,
        }
    }

    pub fn total(&self) -> f64 {
        self.maintenance_urgency
            + self.fuel_efficiency_anomaly
            + self.environmental_exposure
            + self.operational_strain
    }

    pub fn validate(&self) -> Result<()> {
        for (factor, value) in [
            (RiskFactorId::MaintenanceUrgency, self.maintenance_urgency),
            (RiskFactorId::FuelEfficiencyAnomaly, self.fuel_efficiency_anomaly),
            (RiskFactorId::EnvironmentalExposure, self.environmental_exposure),
            (RiskFactorId::OperationalStrain, self.operational_strain),
        ] {
            ensure!(
                value.is_finite() && value >= 0.0,
                InvalidWeightSnafu { factor, value }
            );
        }

        let total = self.total();
        ensure!(total > 0.0, WeightSumSnafu { total });

        Ok(())
    }

    /// Rescales the weights to sum to 1.
    ///
    /// Must only be called on weights that passed [`RiskWeights::validate`].
    pub fn normalized(&self) -> Self {
        let total = self.total();
        if total == 1.0 {
            return *self;
        }
        debug!("renormalizing risk weights summing to {total}");

        Self {
            maintenance_urgency: self.maintenance_urgency / total,
            fuel_efficiency_anomaly: self.fuel_efficiency_anomaly / total,
            environmental_exposure: self.environmental_exposure / total,
            operational_strain: self.operational_strain / total,
        }
    }
}

impl RiskThresholds {
    pub fn new(medium: f64, high: f64, critical: f64) -> Result<Self> {
        let thresholds = Self {
            medium,
            high,
            critical,
        };
        thresholds.validate()?;
        Ok(thresholds)
    }

    pub fn validate(&self) -> Result<()> {
        let Self {
            medium,
            high,
            critical,
        } = *self;

        ensure!(
            medium.is_finite()
                && high.is_finite()
                && critical.is_finite()
                && medium < high
                && high < critical,
            ThresholdsSnafu {
                medium,
                high,
                critical,
            }
        );

        Ok(())
    }

    pub fn category(&self, score: f64) -> RiskCategory {
        if score >= self.critical {
            RiskCategory::Critical
        } else if score >= self.high {
            RiskCategory::High
        } else if score >= self.medium {
            RiskCategory::Medium
        } else {
            RiskCategory::Low
        }
    }
}

impl RecencyWeighting {
    /// Weight of an incident `age` old inside a trailing window of `window`.
    pub fn weight(&self, age: Duration, window: Duration) -> f64 {
        if age > window {
            return 0.0;
        }
        match self {
            RecencyWeighting::Uniform => 1.0,
            RecencyWeighting::Linear => 1.0 - age.as_secs_f64() / window.as_secs_f64(),
            RecencyWeighting::Exponential { half_life } => {
                0.5_f64.powf(age.as_secs_f64() / half_life.as_secs_f64())
            }
        }
    }
}

fn positive(name: &'static str, value: f64) -> Result<()> {
    ensure!(
        value.is_finite() && value > 0.0,
        OutOfRangeSnafu { name, value }
    );
    Ok(())
}
