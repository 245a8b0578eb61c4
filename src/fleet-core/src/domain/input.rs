use crate::{IntegratedRow, MaintenanceIncident, VesselRecord};
use chrono::{DateTime, Utc};

/// Fully materialized input of a single analysis run.
#[derive(Debug, Clone, Default)]
pub struct AnalysisInput {
    pub vessels: Vec<VesselRecord>,
    pub rows: Vec<IntegratedRow>,
    pub incidents: Vec<MaintenanceIncident>,
    /// Reference time for trailing windows, defaults to the latest timestamp
    /// found in the input.
    pub as_of: Option<DateTime<Utc>>,
}

impl AnalysisInput {
    pub fn new(
        vessels: Vec<VesselRecord>,
        rows: Vec<IntegratedRow>,
        incidents: Vec<MaintenanceIncident>,
    ) -> Self {
        Self {
            vessels,
            rows,
            incidents,
            as_of: None,
        }
    }

    pub fn with_as_of(mut self, as_of: DateTime<Utc>) -> Self {
        self.as_of = Some(as_of);
        self
    }
}
