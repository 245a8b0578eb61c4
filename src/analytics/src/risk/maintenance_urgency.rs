use crate::{RiskFactor, ScoringContext, trailing_window};
use fleet_core::{RiskFactorId, VesselMetrics};

/// Recency-weighted severity of the incidents within the trailing window.
///
/// Undefined for vessels that were never observed, a vessel with navigation
/// data but no incidents scores 0.
#[derive(Default)]
pub struct MaintenanceUrgency;

impl RiskFactor for MaintenanceUrgency {
    fn factor_id(&self) -> RiskFactorId {
        RiskFactorId::MaintenanceUrgency
    }

    fn sub_score(&self, vessel: &VesselMetrics, ctx: &ScoringContext<'_>) -> Option<f64> {
        if !vessel.is_observed() {
            return None;
        }
        let as_of = ctx.as_of?;
        let window = ctx.config.trailing_window;

        let weighted_severity: f64 = trailing_window(ctx.incidents, as_of, window)
            .map(|(incident, age)| {
                incident.clamped_severity() * ctx.config.recency_weighting.weight(age, window)
            })
            .sum();

        Some(weighted_severity * ctx.config.maintenance_points_per_severity)
    }
}
