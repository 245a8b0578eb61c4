use crate::{RiskFactor, ScoringContext};
use fleet_core::{RiskFactorId, VesselMetrics};

/// Utilization above the configured threshold, scaled so that full
/// utilization scores 100.
#[derive(Default)]
pub struct OperationalStrain;

impl RiskFactor for OperationalStrain {
    fn factor_id(&self) -> RiskFactorId {
        RiskFactorId::OperationalStrain
    }

    fn sub_score(&self, vessel: &VesselMetrics, ctx: &ScoringContext<'_>) -> Option<f64> {
        let utilization = vessel.utilization_ratio?;
        let threshold = ctx.config.high_utilization_threshold;

        if utilization <= threshold {
            Some(0.0)
        } else {
            Some((utilization - threshold) / (1.0 - threshold) * 100.0)
        }
    }
}
