use chrono::{DateTime, TimeDelta, Utc};
use fleet_core::{
    AnalysisInput, Diagnostics, EnvironmentSample, FuelRecord, IntegratedRow, IntegrationConfig,
    MaintenanceIncident, RecordSet, VesselId, VesselRecord, sort_incidents, sort_rows,
};
use itertools::Itertools;
use std::{
    cmp::Ordering,
    collections::{BTreeMap, BTreeSet},
};
use tracing::{debug, instrument, warn};

/// Joins navigation events with the nearest-in-time context of every other
/// record kind of the same vessel.
///
/// Environment samples without a vessel id describe fleet-wide conditions and
/// are joined to every vessel, a vessel's own samples take precedence.
#[derive(Debug, Clone)]
pub struct Integrator {
    tolerance: TimeDelta,
}

/// Integrated dataset, ready to be handed to the analytics engine.
///
/// The diagnostics only carry what the integrator itself excluded, context
/// coverage is counted by the engine.
#[derive(Debug, Clone, Default)]
pub struct Integrated {
    pub vessels: Vec<VesselRecord>,
    /// Ordered by vessel id and then canonically within each vessel.
    pub rows: Vec<IntegratedRow>,
    pub incidents: Vec<MaintenanceIncident>,
    pub diagnostics: Diagnostics,
    /// Fuel records that matched no navigation event within the tolerance.
    pub unmatched_fuel_records: usize,
}

impl Integrated {
    pub fn into_input(self) -> AnalysisInput {
        AnalysisInput::new(self.vessels, self.rows, self.incidents)
    }
}

impl Integrator {
    pub fn new(config: &IntegrationConfig) -> Self {
        Self {
            tolerance: TimeDelta::from_std(config.join_tolerance).unwrap_or(TimeDelta::MAX),
        }
    }

    #[instrument(skip_all, fields(
        vessels = records.vessels.len(),
        navigation = records.navigation.len(),
    ))]
    pub fn integrate(&self, records: RecordSet) -> Integrated {
        let RecordSet {
            vessels,
            navigation,
            environment,
            fuel,
            mut maintenance,
        } = records;

        let known = vessels
            .iter()
            .map(|v| v.vessel_id.clone())
            .collect::<BTreeSet<_>>();

        let mut diagnostics = Diagnostics::default();
        let mut events: BTreeMap<VesselId, Vec<IntegratedRow>> = BTreeMap::new();
        for event in navigation {
            if known.contains(&event.vessel_id) {
                events
                    .entry(event.vessel_id.clone())
                    .or_default()
                    .push(IntegratedRow::new(event));
            } else {
                diagnostics.unresolved_vessel_rows += 1;
                diagnostics.unresolved_vessel_ids.insert(event.vessel_id);
            }
        }

        let (mut fleet_wide, environment): (Vec<_>, Vec<_>) = environment
            .into_iter()
            .partition(|e| e.vessel_id.is_none());
        fleet_wide.sort_by(EnvironmentSample::canonical_cmp);
        let environment = by_vessel(
            environment,
            |e| e.vessel_id.as_ref(),
            EnvironmentSample::canonical_cmp,
        );
        let fuel = by_vessel(fuel, |f| Some(&f.vessel_id), FuelRecord::canonical_cmp);
        sort_incidents(&mut maintenance);
        let incidents = maintenance
            .iter()
            .cloned()
            .into_group_map_by(|i| i.vessel_id.clone());

        let mut unmatched_fuel_records = 0;
        let mut rows = Vec::new();

        for (vessel_id, mut vessel_rows) in events {
            sort_rows(&mut vessel_rows);

            let own = environment
                .get(&vessel_id)
                .map(Vec::as_slice)
                .unwrap_or_default();
            for row in &mut vessel_rows {
                row.environment = self
                    .nearest_sample(own, row.timestamp())
                    .or_else(|| self.nearest_sample(&fleet_wide, row.timestamp()))
                    .cloned();
            }

            if let Some(incidents) = incidents.get(&vessel_id) {
                for row in &mut vessel_rows {
                    row.maintenance = nearest(incidents, row.timestamp(), self.tolerance, |i| {
                        i.timestamp
                    })
                    .map(|i| incidents[i].clone());
                }
            }

            if let Some(records) = fuel.get(&vessel_id) {
                unmatched_fuel_records += self.attribute_fuel(&mut vessel_rows, records);
            }

            rows.extend(vessel_rows);
        }

        if diagnostics.unresolved_vessel_rows > 0 {
            warn!(
                "dropped {} navigation events of unknown vessels: {:?}",
                diagnostics.unresolved_vessel_rows, diagnostics.unresolved_vessel_ids
            );
        }
        if unmatched_fuel_records > 0 {
            debug!("{unmatched_fuel_records} fuel records matched no navigation event");
        }

        Integrated {
            vessels,
            rows,
            incidents: maintenance,
            diagnostics,
            unmatched_fuel_records,
        }
    }

    fn nearest_sample<'a>(
        &self,
        samples: &'a [EnvironmentSample],
        timestamp: DateTime<Utc>,
    ) -> Option<&'a EnvironmentSample> {
        nearest(samples, timestamp, self.tolerance, |s| s.timestamp).map(|i| &samples[i])
    }

    /// Attributes each fuel record to its single nearest navigation event,
    /// returning the number of records that matched none.
    fn attribute_fuel(&self, rows: &mut [IntegratedRow], records: &[FuelRecord]) -> usize {
        let mut unmatched = 0;
        let mut per_row: BTreeMap<usize, Vec<FuelRecord>> = BTreeMap::new();

        for record in records {
            match nearest(rows, record.timestamp, self.tolerance, |r| r.timestamp()) {
                Some(idx) => per_row.entry(idx).or_default().push(record.clone()),
                None => unmatched += 1,
            }
        }

        for (idx, records) in per_row {
            rows[idx].fuel = FuelRecord::combine(&records);
        }

        unmatched
    }
}

/// Index of the item closest in time to `timestamp` within `tolerance`.
///
/// `items` must be sorted by `key`. On equal distance the earlier item wins.
pub fn nearest<T>(
    items: &[T],
    timestamp: DateTime<Utc>,
    tolerance: TimeDelta,
    key: impl Fn(&T) -> DateTime<Utc>,
) -> Option<usize> {
    let idx = items.partition_point(|i| key(i) < timestamp);

    let before = idx
        .checked_sub(1)
        .map(|i| (i, timestamp - key(&items[i])));
    let after = items.get(idx).map(|item| (idx, key(item) - timestamp));

    [before, after]
        .into_iter()
        .flatten()
        .filter(|(_, distance)| *distance <= tolerance)
        .min_by_key(|(_, distance)| *distance)
        .map(|(i, _)| i)
}

fn by_vessel<T>(
    items: Vec<T>,
    vessel_id: impl Fn(&T) -> Option<&VesselId>,
    cmp: impl Fn(&T, &T) -> Ordering,
) -> BTreeMap<VesselId, Vec<T>> {
    let mut map: BTreeMap<VesselId, Vec<T>> = BTreeMap::new();
    for item in items {
        if let Some(id) = vessel_id(&item) {
            map.entry(id.clone()).or_default().push(item);
        }
    }
    for v in map.values_mut() {
        v.sort_by(&cmp);
    }
    map
}
