use crate::{VesselPartition, max_f64};
use chrono::{DateTime, Utc};
use fleet_core::{
    AnalyticsConfig, Diagnostics, IntegratedRow, MaintenanceIncident, Mean, VesselMetrics,
};
use std::{sync::Arc, time::Duration};

static DEFAULT_ENGINE_LOAD_PERCENT: f64 = 50.0;
static MIN_ENGINE_HEALTH: f64 = 20.0;
static MAX_ENGINE_HEALTH: f64 = 100.0;
static FREQUENCY_PERIOD_DAYS: f64 = 30.0;

/// Computes the pre-risk metrics of a single vessel.
#[derive(Debug, Clone)]
pub struct MetricsCalculator {
    config: Arc<AnalyticsConfig>,
}

#[derive(Debug, Clone)]
pub struct VesselOutcome {
    pub metrics: VesselMetrics,
    pub diagnostics: Diagnostics,
}

impl MetricsCalculator {
    pub fn new(config: Arc<AnalyticsConfig>) -> Self {
        Self { config }
    }

    /// Expects rows and incidents in canonical order, as produced by [`crate::partition`].
    pub fn calculate(
        &self,
        partition: &VesselPartition,
        as_of: Option<DateTime<Utc>>,
    ) -> VesselOutcome {
        let vessel = &partition.vessel;
        let rows = &partition.rows;
        let incidents = &partition.incidents;

        let mut metrics = VesselMetrics::no_data(vessel.vessel_id.clone(), vessel.vessel_class);
        let mut diagnostics = Diagnostics::default();

        if rows.is_empty() && incidents.is_empty() {
            return VesselOutcome {
                metrics,
                diagnostics,
            };
        }

        metrics.navigation_events = rows.len() as u32;

        self.speed(rows, &mut metrics);
        metrics.total_distance_nm = (!rows.is_empty()).then(|| valid_distances(rows.iter()).sum());
        metrics.utilization_ratio = self.utilization(rows);
        metrics.avg_engine_rpm = rows
            .iter()
            .filter_map(|r| r.navigation.engine_rpm)
            .filter(|v| v.is_finite())
            .mean();

        fuel(rows, &mut metrics);
        self.environment(rows, &mut metrics);
        self.maintenance(incidents, as_of, &mut metrics);

        diagnostics.implausible_speed_samples = metrics.excluded_speed_samples as usize;
        diagnostics.rows_without_fuel_context = rows.iter().filter(|r| r.fuel.is_none()).count();
        diagnostics.rows_without_environment_context =
            rows.iter().filter(|r| r.environment.is_none()).count();

        VesselOutcome {
            metrics,
            diagnostics,
        }
    }

    fn speed(&self, rows: &[IntegratedRow], metrics: &mut VesselMetrics) {
        let max = self.config.max_plausible_speed_knots;
        let speeds = rows
            .iter()
            .filter_map(|r| r.navigation.plausible_speed(max))
            .collect::<Vec<_>>();

        metrics.excluded_speed_samples = (rows.len() - speeds.len()) as u32;
        metrics.avg_speed_knots = speeds.iter().copied().mean();
        metrics.max_speed_knots = max_f64(speeds.into_iter());
    }

    /// Share of the elapsed time between the first and last event spent in
    /// active navigation.
    fn utilization(&self, rows: &[IntegratedRow]) -> Option<f64> {
        let (first, last) = (rows.first()?, rows.last()?);
        if rows.len() < 2 {
            return None;
        }

        let elapsed = (last.timestamp() - first.timestamp()).num_milliseconds();
        if elapsed <= 0 {
            return None;
        }

        let active: i64 = rows
            .windows(2)
            .filter(|w| {
                w[0].navigation
                    .plausible_speed(self.config.max_plausible_speed_knots)
                    .is_some_and(|s| s > self.config.active_speed_knots)
            })
            .map(|w| (w[1].timestamp() - w[0].timestamp()).num_milliseconds())
            .sum();

        Some(active as f64 / elapsed as f64)
    }

    fn environment(&self, rows: &[IntegratedRow], metrics: &mut VesselMetrics) {
        let limits = &self.config.adverse_environment;
        let samples = rows
            .iter()
            .filter_map(|r| r.environment.as_ref())
            .collect::<Vec<_>>();

        metrics.environment_samples = samples.len() as u32;
        metrics.adverse_environment_samples = samples
            .iter()
            .filter(|s| {
                s.wave_height_meters >= limits.wave_height_meters
                    || s.wind_speed_knots >= limits.wind_speed_knots
                    || s.storm_risk_index() >= limits.storm_risk_index
            })
            .count() as u32;
        metrics.environmental_exposure = samples.iter().map(|s| s.storm_risk_index()).mean();
    }

    fn maintenance(
        &self,
        incidents: &[MaintenanceIncident],
        as_of: Option<DateTime<Utc>>,
        metrics: &mut VesselMetrics,
    ) {
        metrics.maintenance_incidents = incidents.len() as u32;
        metrics.maintenance_cost_total = Some(incidents.iter().map(|i| i.cost_usd).sum());
        metrics.maintenance_downtime_hours = Some(incidents.iter().map(|i| i.downtime_hours).sum());
        metrics.maintenance_frequency = as_of.map(|as_of| {
            let in_window = trailing_window(incidents, as_of, self.config.trailing_window).count();
            in_window as f64 / self.config.trailing_window_days() * FREQUENCY_PERIOD_DAYS
        });
    }
}

fn fuel(rows: &[IntegratedRow], metrics: &mut VesselMetrics) {
    let fuel_rows = rows.iter().filter(|r| r.fuel.is_some()).collect::<Vec<_>>();
    if fuel_rows.is_empty() {
        return;
    }

    let consumed: f64 = fuel_rows
        .iter()
        .filter_map(|r| r.fuel.as_ref())
        .map(|f| f.consumed_liters)
        .filter(|v| v.is_finite() && *v >= 0.0)
        .sum();
    let distance: f64 = valid_distances(fuel_rows.iter().copied()).sum();

    metrics.total_fuel_liters = Some(consumed);
    metrics.fuel_efficiency_nm_per_liter = (consumed > 0.0).then(|| distance / consumed);
    metrics.avg_engine_load_percent = fuel_rows
        .iter()
        .filter_map(|r| r.fuel.as_ref().and_then(|f| f.engine_load_percent))
        .mean();
    metrics.engine_health_score = fuel_rows.iter().map(|r| engine_health(r)).mean();
}

fn valid_distances<'a>(rows: impl Iterator<Item = &'a IntegratedRow>) -> impl Iterator<Item = f64> {
    rows.map(|r| r.navigation.distance_nm)
        .filter(|d| d.is_finite() && *d >= 0.0)
}

/// Engine health of a single row on a 20-100 scale, penalizing engine load and
/// any maintenance joined to the row.
fn engine_health(row: &IntegratedRow) -> f64 {
    let load = row
        .fuel
        .as_ref()
        .and_then(|f| f.engine_load_percent)
        .unwrap_or(DEFAULT_ENGINE_LOAD_PERCENT);
    let (cost, downtime) = row
        .maintenance
        .as_ref()
        .map(|m| (m.cost_usd, m.downtime_hours))
        .unwrap_or_default();

    (MAX_ENGINE_HEALTH - (load * 0.4 + cost / 100.0 * 0.3 + downtime * 0.5))
        .clamp(MIN_ENGINE_HEALTH, MAX_ENGINE_HEALTH)
}

/// Incidents that happened within `window` before `as_of`, paired with their age.
pub fn trailing_window(
    incidents: &[MaintenanceIncident],
    as_of: DateTime<Utc>,
    window: Duration,
) -> impl Iterator<Item = (&MaintenanceIncident, Duration)> {
    incidents.iter().filter_map(move |i| {
        let age = (as_of - i.timestamp).to_std().ok()?;
        (age <= window).then_some((i, age))
    })
}
