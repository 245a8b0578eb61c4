use crate::{Spread, VesselPartition};
use chrono::{DateTime, Utc};
use fleet_core::{
    AnalyticsConfig, FactorScore, MaintenanceIncident, RiskAssessment, RiskFactorId,
    RiskThresholds, RiskWeights, VesselMetrics,
};
use std::sync::Arc;
use tracing::debug;

mod environmental_exposure;
mod fuel_anomaly;
mod maintenance_urgency;
mod operational_strain;

pub use environmental_exposure::*;
pub use fuel_anomaly::*;
pub use maintenance_urgency::*;
pub use operational_strain::*;

/// Minimum number of vessels with a defined efficiency for the fleet baseline.
static MIN_BASELINE_VESSELS: usize = 2;

/// Everything a factor may look at besides the vessel's own metrics.
pub struct ScoringContext<'a> {
    pub config: &'a AnalyticsConfig,
    pub baseline: &'a FleetBaseline,
    pub incidents: &'a [MaintenanceIncident],
    pub as_of: Option<DateTime<Utc>>,
}

/// A single dimension of the composite risk score.
pub trait RiskFactor: Send + Sync {
    fn factor_id(&self) -> RiskFactorId;
    /// Returns `None` when the factor cannot be computed for this vessel.
    /// The result is clamped to 0-100 by the caller.
    fn sub_score(&self, vessel: &VesselMetrics, ctx: &ScoringContext<'_>) -> Option<f64>;
}

/// Fleet-wide statistics that must be known before any vessel can be scored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FleetBaseline {
    pub efficiency: Option<Spread>,
}

impl FleetBaseline {
    /// Only vessels with a defined efficiency take part, and fewer than two of
    /// them leave the baseline undefined.
    pub fn new<'a>(metrics: impl IntoIterator<Item = &'a VesselMetrics>) -> Self {
        let efficiencies = metrics
            .into_iter()
            .filter_map(|m| m.fuel_efficiency_nm_per_liter)
            .collect::<Vec<_>>();

        let efficiency = if efficiencies.len() < MIN_BASELINE_VESSELS {
            None
        } else {
            Spread::new(&efficiencies)
        };

        Self { efficiency }
    }
}

pub struct RiskAssessor {
    config: Arc<AnalyticsConfig>,
    weights: RiskWeights,
    factors: Vec<Box<dyn RiskFactor>>,
}

impl RiskAssessor {
    pub fn new(config: Arc<AnalyticsConfig>) -> Self {
        Self {
            weights: config.weights.normalized(),
            config,
            factors: enabled_factors(),
        }
    }

    /// Scores a vessel, returning a new metrics value carrying the assessment.
    pub fn assess(
        &self,
        metrics: VesselMetrics,
        partition: &VesselPartition,
        baseline: &FleetBaseline,
        as_of: Option<DateTime<Utc>>,
    ) -> VesselMetrics {
        let ctx = ScoringContext {
            config: &self.config,
            baseline,
            incidents: &partition.incidents,
            as_of,
        };

        let sub_scores = self
            .factors
            .iter()
            .map(|f| {
                let score = f
                    .sub_score(&metrics, &ctx)
                    .filter(|v| !v.is_nan())
                    .map(|v| v.clamp(0.0, 100.0));
                (f.factor_id(), score)
            })
            .collect::<Vec<_>>();

        let risk = composite(&sub_scores, &self.weights, &self.config.thresholds);
        if risk.is_none() {
            debug!("vessel '{}' has no computable risk factor", metrics.vessel_id);
        }

        metrics.with_risk(risk)
    }
}

/// Weighted sum of the defined sub-scores with their weights renormalized to
/// sum to 1. Returns `None` if no weighted factor is defined.
pub fn composite(
    sub_scores: &[(RiskFactorId, Option<f64>)],
    weights: &RiskWeights,
    thresholds: &RiskThresholds,
) -> Option<RiskAssessment> {
    let defined_weight: f64 = sub_scores
        .iter()
        .filter(|(_, score)| score.is_some())
        .map(|(id, _)| weights.get(*id))
        .sum();

    if defined_weight <= 0.0 {
        return None;
    }

    let factors = sub_scores
        .iter()
        .map(|(id, score)| FactorScore {
            factor: *id,
            sub_score: *score,
            applied_weight: match score {
                Some(_) => weights.get(*id) / defined_weight,
                None => 0.0,
            },
        })
        .collect::<Vec<_>>();

    let score = factors
        .iter()
        .filter_map(|f| f.sub_score.map(|s| s * f.applied_weight))
        .sum::<f64>()
        .clamp(0.0, 100.0);

    Some(RiskAssessment {
        score,
        category: thresholds.category(score),
        factors,
    })
}

fn enabled_factors() -> Vec<Box<dyn RiskFactor>> {
    vec![
        Box::<MaintenanceUrgency>::default(),
        Box::<FuelEfficiencyAnomaly>::default(),
        Box::<EnvironmentalExposure>::default(),
        Box::<OperationalStrain>::default(),
    ]
}
