use super::cmp_opt_f64;
use crate::VesselId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

static STORM_PROBABILITY_FACTOR: f64 = 0.5;
static WAVE_HEIGHT_REFERENCE_METERS: f64 = 6.0;
static WAVE_HEIGHT_FACTOR: f64 = 50.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentSample {
    /// `None` for fleet-wide conditions that apply to every vessel.
    pub vessel_id: Option<VesselId>,
    pub timestamp: DateTime<Utc>,
    pub wave_height_meters: f64,
    pub wind_speed_knots: f64,
    pub visibility_km: Option<f64>,
    pub storm_probability_percent: f64,
    pub sea_temperature_celsius: Option<f64>,
    pub ocean_current_knots: Option<f64>,
}

impl EnvironmentSample {
    /// Storm risk on a 0-100 scale, combining storm probability and wave height.
    pub fn storm_risk_index(&self) -> f64 {
        (self.storm_probability_percent * STORM_PROBABILITY_FACTOR
            + (self.wave_height_meters / WAVE_HEIGHT_REFERENCE_METERS) * WAVE_HEIGHT_FACTOR)
            .clamp(0.0, 100.0)
    }

    /// Total order over every field, fleet-wide samples first on a tie.
    pub fn canonical_cmp(&self, other: &Self) -> Ordering {
        self.timestamp
            .cmp(&other.timestamp)
            .then_with(|| self.vessel_id.cmp(&other.vessel_id))
            .then_with(|| self.wave_height_meters.total_cmp(&other.wave_height_meters))
            .then_with(|| self.wind_speed_knots.total_cmp(&other.wind_speed_knots))
            .then_with(|| {
                self.storm_probability_percent
                    .total_cmp(&other.storm_probability_percent)
            })
            .then_with(|| cmp_opt_f64(self.visibility_km, other.visibility_km))
            .then_with(|| {
                cmp_opt_f64(self.sea_temperature_celsius, other.sea_temperature_celsius)
            })
            .then_with(|| cmp_opt_f64(self.ocean_current_knots, other.ocean_current_knots))
    }
}
