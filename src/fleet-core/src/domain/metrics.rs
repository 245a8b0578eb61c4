use crate::{VesselClass, VesselId};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString};

#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    AsRefStr,
    EnumString,
    EnumIter,
)]
pub enum RiskCategory {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    AsRefStr,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RiskFactorId {
    MaintenanceUrgency,
    FuelEfficiencyAnomaly,
    EnvironmentalExposure,
    OperationalStrain,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorScore {
    pub factor: RiskFactorId,
    /// `None` when the factor could not be computed for the vessel.
    pub sub_score: Option<f64>,
    /// Weight after renormalization over the defined factors, 0 for undefined ones.
    pub applied_weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub score: f64,
    pub category: RiskCategory,
    pub factors: Vec<FactorScore>,
}

impl RiskAssessment {
    pub fn factor(&self, id: RiskFactorId) -> Option<&FactorScore> {
        self.factors.iter().find(|f| f.factor == id)
    }

    pub fn applied_weight_total(&self) -> f64 {
        self.factors.iter().map(|f| f.applied_weight).sum()
    }
}

/// Aggregate metrics of a single vessel.
///
/// Every `Option` is `None` when the metric could not be computed from the
/// available data, which is distinct from a computed value of zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VesselMetrics {
    pub vessel_id: VesselId,
    pub vessel_class: VesselClass,
    pub navigation_events: u32,
    /// Speed samples left out of the speed aggregates for being negative or implausible.
    pub excluded_speed_samples: u32,
    pub total_distance_nm: Option<f64>,
    pub total_fuel_liters: Option<f64>,
    pub fuel_efficiency_nm_per_liter: Option<f64>,
    pub avg_speed_knots: Option<f64>,
    pub max_speed_knots: Option<f64>,
    pub utilization_ratio: Option<f64>,
    pub avg_engine_load_percent: Option<f64>,
    pub avg_engine_rpm: Option<f64>,
    pub engine_health_score: Option<f64>,
    pub maintenance_incidents: u32,
    /// Incidents per 30 days within the trailing window.
    pub maintenance_frequency: Option<f64>,
    pub maintenance_cost_total: Option<f64>,
    pub maintenance_downtime_hours: Option<f64>,
    pub environment_samples: u32,
    pub adverse_environment_samples: u32,
    pub environmental_exposure: Option<f64>,
    pub risk: Option<RiskAssessment>,
}

impl VesselMetrics {
    /// Metrics of a vessel without any data, every metric set to `None`.
    pub fn no_data(vessel_id: VesselId, vessel_class: VesselClass) -> Self {
        Self {
            vessel_id,
            vessel_class,
            navigation_events: 0,
            excluded_speed_samples: 0,
            total_distance_nm: None,
            total_fuel_liters: None,
            fuel_efficiency_nm_per_liter: None,
            avg_speed_knots: None,
            max_speed_knots: None,
            utilization_ratio: None,
            avg_engine_load_percent: None,
            avg_engine_rpm: None,
            engine_health_score: None,
            maintenance_incidents: 0,
            maintenance_frequency: None,
            maintenance_cost_total: None,
            maintenance_downtime_hours: None,
            environment_samples: 0,
            adverse_environment_samples: 0,
            environmental_exposure: None,
            risk: None,
        }
    }

    pub fn risk_score(&self) -> Option<f64> {
        self.risk.as_ref().map(|r| r.score)
    }

    pub fn risk_category(&self) -> Option<RiskCategory> {
        self.risk.as_ref().map(|r| r.category)
    }

    /// A vessel is observed when there is at least one navigation event or
    /// maintenance incident for it.
    pub fn is_observed(&self) -> bool {
        self.navigation_events > 0 || self.maintenance_incidents > 0
    }

    pub fn with_risk(self, risk: Option<RiskAssessment>) -> Self {
        Self { risk, ..self }
    }
}
