use crate::{RiskCategory, VesselId, VesselMetrics};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::{AsRefStr, EnumIter};

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
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MetricId {
    TotalDistance,
    TotalFuel,
    FuelEfficiency,
    AvgSpeed,
    MaxSpeed,
    UtilizationRatio,
    AvgEngineLoad,
    AvgEngineRpm,
    EngineHealth,
    MaintenanceFrequency,
    MaintenanceCost,
    MaintenanceDowntime,
    EnvironmentalExposure,
    RiskScore,
}

impl MetricId {
    pub fn value(&self, metrics: &VesselMetrics) -> Option<f64> {
        match self {
            MetricId::TotalDistance => metrics.total_distance_nm,
            MetricId::TotalFuel => metrics.total_fuel_liters,
            MetricId::FuelEfficiency => metrics.fuel_efficiency_nm_per_liter,
            MetricId::AvgSpeed => metrics.avg_speed_knots,
            MetricId::MaxSpeed => metrics.max_speed_knots,
            MetricId::UtilizationRatio => metrics.utilization_ratio,
            MetricId::AvgEngineLoad => metrics.avg_engine_load_percent,
            MetricId::AvgEngineRpm => metrics.avg_engine_rpm,
            MetricId::EngineHealth => metrics.engine_health_score,
            MetricId::MaintenanceFrequency => metrics.maintenance_frequency,
            MetricId::MaintenanceCost => metrics.maintenance_cost_total,
            MetricId::MaintenanceDowntime => metrics.maintenance_downtime_hours,
            MetricId::EnvironmentalExposure => metrics.environmental_exposure,
            MetricId::RiskScore => metrics.risk_score(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricStatistics {
    /// Number of vessels with a defined value.
    pub count: usize,
    /// Number of vessels left out for lacking a value.
    pub excluded: usize,
    pub mean: Option<f64>,
    pub median: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub critical: usize,
    /// Vessels without a composite score.
    pub unscored: usize,
}

impl CategoryCounts {
    pub fn get(&self, category: RiskCategory) -> usize {
        match category {
            RiskCategory::Low => self.low,
            RiskCategory::Medium => self.medium,
            RiskCategory::High => self.high,
            RiskCategory::Critical => self.critical,
        }
    }

    pub fn increment(&mut self, category: Option<RiskCategory>) {
        let slot = match category {
            Some(RiskCategory::Low) => &mut self.low,
            Some(RiskCategory::Medium) => &mut self.medium,
            Some(RiskCategory::High) => &mut self.high,
            Some(RiskCategory::Critical) => &mut self.critical,
            None => &mut self.unscored,
        };
        *slot += 1;
    }

    pub fn scored(&self) -> usize {
        self.low + self.medium + self.high + self.critical
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlaggedVessel {
    pub vessel_id: VesselId,
    pub score: f64,
    pub category: RiskCategory,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FleetSummary {
    pub total_vessels: usize,
    pub category_counts: CategoryCounts,
    pub metrics: BTreeMap<MetricId, MetricStatistics>,
    /// Vessels at or above the high risk threshold, highest score first.
    pub flagged: Vec<FlaggedVessel>,
}

impl FleetSummary {
    pub fn flagged_ids(&self) -> impl Iterator<Item = &VesselId> {
        self.flagged.iter().map(|v| &v.vessel_id)
    }

    pub fn metric(&self, id: MetricId) -> Option<&MetricStatistics> {
        self.metrics.get(&id)
    }
}
