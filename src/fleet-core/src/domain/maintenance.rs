use crate::VesselId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

pub static MAX_INCIDENT_SEVERITY: f64 = 10.0;

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
)]
#[strum(ascii_case_insensitive)]
pub enum IncidentType {
    #[strum(serialize = "Mechanical Failure")]
    MechanicalFailure,
    Preventive,
    Inspection,
    Emergency,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceIncident {
    pub vessel_id: VesselId,
    pub timestamp: DateTime<Utc>,
    pub incident_type: IncidentType,
    pub maintenance_type: Option<String>,
    /// Severity on a 0-10 scale.
    pub severity: f64,
    pub cost_usd: f64,
    pub downtime_hours: f64,
}

impl MaintenanceIncident {
    pub fn clamped_severity(&self) -> f64 {
        if self.severity.is_finite() {
            self.severity.clamp(0.0, MAX_INCIDENT_SEVERITY)
        } else {
            0.0
        }
    }

    pub(crate) fn canonical_cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.timestamp
            .cmp(&other.timestamp)
            .then_with(|| self.incident_type.cmp(&other.incident_type))
            .then_with(|| self.severity.total_cmp(&other.severity))
            .then_with(|| self.cost_usd.total_cmp(&other.cost_usd))
            .then_with(|| self.downtime_hours.total_cmp(&other.downtime_hours))
            .then_with(|| self.maintenance_type.cmp(&other.maintenance_type))
    }
}

/// Puts incidents in a canonical order so that reductions over them do not
/// depend on the order they were handed in.
pub fn sort_incidents(incidents: &mut [MaintenanceIncident]) {
    incidents.sort_unstable_by(|a, b| a.canonical_cmp(b));
}
