use crate::{RiskFactor, ScoringContext};
use fleet_core::{RiskFactorId, VesselMetrics};

/// Penalizes fuel efficiency below the fleet mean, in standard deviations.
/// Efficiency above the mean never adds risk.
#[derive(Default)]
pub struct FuelEfficiencyAnomaly;

impl RiskFactor for FuelEfficiencyAnomaly {
    fn factor_id(&self) -> RiskFactorId {
        RiskFactorId::FuelEfficiencyAnomaly
    }

    fn sub_score(&self, vessel: &VesselMetrics, ctx: &ScoringContext<'_>) -> Option<f64> {
        let efficiency = vessel.fuel_efficiency_nm_per_liter?;
        let baseline = ctx.baseline.efficiency?;

        if baseline.std_dev == 0.0 {
            return Some(0.0);
        }

        let deviations_below = (baseline.mean - efficiency) / baseline.std_dev;
        Some(deviations_below.max(0.0) * ctx.config.anomaly_points_per_std_dev)
    }
}
