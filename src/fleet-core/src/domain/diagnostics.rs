use crate::VesselId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::ops::AddAssign;

/// Data quality counters of an analysis run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    /// Rows whose vessel id does not exist among the vessel records.
    pub unresolved_vessel_rows: usize,
    pub unresolved_vessel_ids: BTreeSet<VesselId>,
    /// Maintenance incidents referencing an unknown vessel.
    pub orphaned_incidents: usize,
    pub duplicate_vessel_records: usize,
    pub implausible_speed_samples: usize,
    pub rows_without_fuel_context: usize,
    pub rows_without_environment_context: usize,
}

impl Diagnostics {
    pub fn has_integrity_faults(&self) -> bool {
        self.unresolved_vessel_rows > 0
            || self.orphaned_incidents > 0
            || self.duplicate_vessel_records > 0
    }
}

impl AddAssign for Diagnostics {
    fn add_assign(&mut self, rhs: Self) {
        let Diagnostics {
            unresolved_vessel_rows,
            unresolved_vessel_ids,
            orphaned_incidents,
            duplicate_vessel_records,
            implausible_speed_samples,
            rows_without_fuel_context,
            rows_without_environment_context,
        } = rhs;

        self.unresolved_vessel_rows += unresolved_vessel_rows;
        self.unresolved_vessel_ids.extend(unresolved_vessel_ids);
        self.orphaned_incidents += orphaned_incidents;
        self.duplicate_vessel_records += duplicate_vessel_records;
        self.implausible_speed_samples += implausible_speed_samples;
        self.rows_without_fuel_context += rows_without_fuel_context;
        self.rows_without_environment_context += rows_without_environment_context;
    }
}
