use crate::VesselId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationEvent {
    pub vessel_id: VesselId,
    pub timestamp: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    pub speed_knots: f64,
    /// Heading deviation from the planned course, in degrees.
    pub course_deviation_degrees: f64,
    /// Distance covered since the previous event, in nautical miles.
    pub distance_nm: f64,
    pub engine_rpm: Option<f64>,
    pub depth_meters: Option<f64>,
}

impl NavigationEvent {
    /// Returns the speed if it is physically plausible given the provided ceiling.
    pub fn plausible_speed(&self, max_speed_knots: f64) -> Option<f64> {
        let speed = self.speed_knots;
        (speed.is_finite() && speed >= 0.0 && speed <= max_speed_knots).then_some(speed)
    }
}
