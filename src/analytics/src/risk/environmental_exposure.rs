use crate::{RiskFactor, ScoringContext};
use fleet_core::{RiskFactorId, VesselMetrics};

static FREQUENCY_SHARE: f64 = 0.5;
static SEVERITY_SHARE: f64 = 0.5;

/// Blends how often the vessel met adverse conditions with the mean storm risk
/// of everything it sailed through.
#[derive(Default)]
pub struct EnvironmentalExposure;

impl RiskFactor for EnvironmentalExposure {
    fn factor_id(&self) -> RiskFactorId {
        RiskFactorId::EnvironmentalExposure
    }

    fn sub_score(&self, vessel: &VesselMetrics, _ctx: &ScoringContext<'_>) -> Option<f64> {
        if vessel.environment_samples == 0 {
            return None;
        }
        let exposure = vessel.environmental_exposure?;
        let adverse_fraction =
            vessel.adverse_environment_samples as f64 / vessel.environment_samples as f64;

        Some(adverse_fraction * 100.0 * FREQUENCY_SHARE + exposure * SEVERITY_SHARE)
    }
}
