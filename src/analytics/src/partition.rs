use chrono::{DateTime, Utc};
use fleet_core::{
    AnalysisInput, Diagnostics, IntegratedRow, MaintenanceIncident, VesselId, VesselRecord,
    sort_incidents, sort_rows,
};
use std::collections::{BTreeMap, btree_map::Entry};
use tracing::warn;

/// All data belonging to a single vessel, rows and incidents in canonical order.
#[derive(Debug, Clone)]
pub struct VesselPartition {
    pub vessel: VesselRecord,
    pub rows: Vec<IntegratedRow>,
    pub incidents: Vec<MaintenanceIncident>,
}

#[derive(Debug, Clone)]
pub struct Partitioned {
    /// Ordered by vessel id.
    pub partitions: Vec<VesselPartition>,
    pub as_of: Option<DateTime<Utc>>,
    pub diagnostics: Diagnostics,
}

impl VesselPartition {
    pub fn vessel_id(&self) -> &VesselId {
        &self.vessel.vessel_id
    }

    fn latest_timestamp(&self) -> Option<DateTime<Utc>> {
        let row = self.rows.last().map(|r| r.timestamp());
        let incident = self.incidents.last().map(|i| i.timestamp);
        row.max(incident)
    }
}

/// Splits the input into one partition per known vessel.
///
/// Rows and incidents referencing unknown vessels are excluded and counted,
/// duplicate vessel records keep their first occurrence.
pub fn partition(input: &AnalysisInput) -> Partitioned {
    let mut diagnostics = Diagnostics::default();
    let mut vessels: BTreeMap<VesselId, VesselPartition> = BTreeMap::new();

    for vessel in &input.vessels {
        match vessels.entry(vessel.vessel_id.clone()) {
            Entry::Vacant(e) => {
                e.insert(VesselPartition {
                    vessel: vessel.clone(),
                    rows: Vec::new(),
                    incidents: Vec::new(),
                });
            }
            Entry::Occupied(_) => diagnostics.duplicate_vessel_records += 1,
        }
    }

    for row in &input.rows {
        match vessels.get_mut(row.vessel_id()) {
            Some(p) => p.rows.push(row.clone()),
            None => {
                diagnostics.unresolved_vessel_rows += 1;
                diagnostics
                    .unresolved_vessel_ids
                    .insert(row.vessel_id().clone());
            }
        }
    }

    for incident in &input.incidents {
        match vessels.get_mut(&incident.vessel_id) {
            Some(p) => p.incidents.push(incident.clone()),
            None => diagnostics.orphaned_incidents += 1,
        }
    }

    for p in vessels.values_mut() {
        sort_rows(&mut p.rows);
        sort_incidents(&mut p.incidents);
    }

    let as_of = input.as_of.or_else(|| {
        vessels
            .values()
            .filter_map(VesselPartition::latest_timestamp)
            .max()
    });

    if diagnostics.has_integrity_faults() {
        warn!(
            "excluded records with integrity faults, unresolved_rows: {}, unresolved_ids: {:?}, orphaned_incidents: {}, duplicate_vessels: {}",
            diagnostics.unresolved_vessel_rows,
            diagnostics.unresolved_vessel_ids,
            diagnostics.orphaned_incidents,
            diagnostics.duplicate_vessel_records,
        );
    }

    Partitioned {
        partitions: vessels.into_values().collect(),
        as_of,
        diagnostics,
    }
}
