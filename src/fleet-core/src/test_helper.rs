use crate::{
    AnalysisInput, EnvironmentSample, FuelRecord, IncidentType, IntegratedRow,
    MaintenanceIncident, NavigationEvent, VesselClass, VesselId, VesselRecord,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct TestState {
    pub vessels: Vec<VesselRecord>,
    pub rows: Vec<IntegratedRow>,
    pub incidents: Vec<MaintenanceIncident>,
}

impl TestState {
    pub fn input(&self) -> AnalysisInput {
        AnalysisInput::new(
            self.vessels.clone(),
            self.rows.clone(),
            self.incidents.clone(),
        )
    }

    /// Same data as [`TestState::input`] with every collection shuffled.
    pub fn shuffled_input(&self, seed: u64) -> AnalysisInput {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut input = self.input();
        input.vessels.shuffle(&mut rng);
        input.rows.shuffle(&mut rng);
        input.incidents.shuffle(&mut rng);
        input
    }
}

pub struct TestStateBuilder {
    vessels: Vec<VesselRecord>,
    rows: Vec<IntegratedRow>,
    incidents: Vec<MaintenanceIncident>,
    vessel_id_counter: u32,
    start: DateTime<Utc>,
    row_gap: Duration,
    timestamp_counter: HashMap<VesselId, DateTime<Utc>>,
}

pub struct RowBuilder {
    state: TestStateBuilder,
    current_index: usize,
}

pub struct IncidentBuilder {
    state: TestStateBuilder,
    current_index: usize,
}

impl Default for TestStateBuilder {
    fn default() -> Self {
        Self {
            vessels: Vec::new(),
            rows: Vec::new(),
            incidents: Vec::new(),
            vessel_id_counter: 1,
            start: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            row_gap: Duration::hours(1),
            timestamp_counter: HashMap::new(),
        }
    }
}

impl TestStateBuilder {
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn row_gap(mut self, gap: Duration) -> Self {
        self.row_gap = gap;
        self
    }

    pub fn vessels(mut self, amount: usize) -> Self {
        for _ in 0..amount {
            let vessel_id = VesselId::from_sequence(self.vessel_id_counter);
            self.vessel_id_counter += 1;
            self.vessels
                .push(VesselRecord::new(vessel_id, VesselClass::Cargo));
        }
        self
    }

    pub fn vessel_id(&self, vessel_index: usize) -> VesselId {
        self.vessels[vessel_index].vessel_id.clone()
    }

    /// Adds `amount` rows for the vessel at `vessel_index`, one `row_gap` apart.
    pub fn rows(self, vessel_index: usize, amount: usize) -> RowBuilder {
        let vessel_id = self.vessel_id(vessel_index);
        self.rows_for(vessel_id, amount)
    }

    /// Adds rows referencing a vessel that has no vessel record.
    pub fn unknown_vessel_rows(self, vessel_id: &str, amount: usize) -> RowBuilder {
        self.rows_for(VesselId::new(vessel_id), amount)
    }

    fn rows_for(mut self, vessel_id: VesselId, amount: usize) -> RowBuilder {
        let current_index = self.rows.len();
        let start = self.start;
        let timestamp = self
            .timestamp_counter
            .entry(vessel_id.clone())
            .or_insert(start);

        for _ in 0..amount {
            self.rows.push(IntegratedRow::new(test_navigation_event(
                vessel_id.clone(),
                *timestamp,
            )));
            *timestamp += self.row_gap;
        }

        RowBuilder {
            state: self,
            current_index,
        }
    }

    /// Adds `amount` incidents for the vessel at `vessel_index`, all at the
    /// timestamp of the vessel's latest row.
    pub fn incidents(mut self, vessel_index: usize, amount: usize) -> IncidentBuilder {
        let vessel_id = self.vessel_id(vessel_index);
        let current_index = self.incidents.len();
        let timestamp = self
            .timestamp_counter
            .get(&vessel_id)
            .map(|t| *t - self.row_gap)
            .unwrap_or(self.start);

        for _ in 0..amount {
            self.incidents
                .push(test_incident(vessel_id.clone(), timestamp));
        }

        IncidentBuilder {
            state: self,
            current_index,
        }
    }

    pub fn build(self) -> TestState {
        TestState {
            vessels: self.vessels,
            rows: self.rows,
            incidents: self.incidents,
        }
    }
}

impl RowBuilder {
    pub fn modify<F>(mut self, mut closure: F) -> Self
    where
        F: FnMut(&mut IntegratedRow),
    {
        self.state.rows[self.current_index..]
            .iter_mut()
            .for_each(&mut closure);
        self
    }

    pub fn modify_idx<F>(mut self, mut closure: F) -> Self
    where
        F: FnMut(usize, &mut IntegratedRow),
    {
        self.state.rows[self.current_index..]
            .iter_mut()
            .enumerate()
            .for_each(|(i, v)| closure(i, v));
        self
    }

    /// Attaches fuel context consuming `liters` to every row of this batch.
    pub fn with_fuel(self, liters: f64) -> Self {
        self.modify(|row| {
            row.fuel = Some(test_fuel_record(
                row.navigation.vessel_id.clone(),
                row.navigation.timestamp,
                liters,
            ))
        })
    }

    pub fn with_environment(self, wave_height_meters: f64, storm_probability_percent: f64) -> Self {
        self.modify(|row| {
            let mut sample =
                test_environment_sample(row.navigation.vessel_id.clone(), row.navigation.timestamp);
            sample.wave_height_meters = wave_height_meters;
            sample.storm_probability_percent = storm_probability_percent;
            row.environment = Some(sample);
        })
    }

    pub fn vessels(self, amount: usize) -> TestStateBuilder {
        self.state.vessels(amount)
    }

    pub fn rows(self, vessel_index: usize, amount: usize) -> RowBuilder {
        self.state.rows(vessel_index, amount)
    }

    pub fn unknown_vessel_rows(self, vessel_id: &str, amount: usize) -> RowBuilder {
        self.state.unknown_vessel_rows(vessel_id, amount)
    }

    pub fn incidents(self, vessel_index: usize, amount: usize) -> IncidentBuilder {
        self.state.incidents(vessel_index, amount)
    }

    pub fn build(self) -> TestState {
        self.state.build()
    }
}

impl IncidentBuilder {
    pub fn modify<F>(mut self, mut closure: F) -> Self
    where
        F: FnMut(&mut MaintenanceIncident),
    {
        self.state.incidents[self.current_index..]
            .iter_mut()
            .for_each(&mut closure);
        self
    }

    pub fn modify_idx<F>(mut self, mut closure: F) -> Self
    where
        F: FnMut(usize, &mut MaintenanceIncident),
    {
        self.state.incidents[self.current_index..]
            .iter_mut()
            .enumerate()
            .for_each(|(i, v)| closure(i, v));
        self
    }

    pub fn rows(self, vessel_index: usize, amount: usize) -> RowBuilder {
        self.state.rows(vessel_index, amount)
    }

    pub fn incidents(self, vessel_index: usize, amount: usize) -> IncidentBuilder {
        self.state.incidents(vessel_index, amount)
    }

    pub fn build(self) -> TestState {
        self.state.build()
    }
}

pub fn test_navigation_event(vessel_id: VesselId, timestamp: DateTime<Utc>) -> NavigationEvent {
    NavigationEvent {
        vessel_id,
        timestamp,
        latitude: 60.39,
        longitude: 5.32,
        speed_knots: 10.0,
        course_deviation_degrees: 0.0,
        distance_nm: 10.0,
        engine_rpm: Some(1200.0),
        depth_meters: None,
    }
}

pub fn test_fuel_record(vessel_id: VesselId, timestamp: DateTime<Utc>, liters: f64) -> FuelRecord {
    FuelRecord {
        vessel_id,
        timestamp,
        consumed_liters: liters,
        rate_liters_per_hour: liters,
        engine_load_percent: Some(50.0),
        load_weight_percent: Some(50.0),
        cost_usd: None,
    }
}

pub fn test_environment_sample(vessel_id: VesselId, timestamp: DateTime<Utc>) -> EnvironmentSample {
    EnvironmentSample {
        vessel_id: Some(vessel_id),
        timestamp,
        wave_height_meters: 1.0,
        wind_speed_knots: 8.0,
        visibility_km: Some(10.0),
        storm_probability_percent: 10.0,
        sea_temperature_celsius: None,
        ocean_current_knots: None,
    }
}

pub fn test_incident(vessel_id: VesselId, timestamp: DateTime<Utc>) -> MaintenanceIncident {
    MaintenanceIncident {
        vessel_id,
        timestamp,
        incident_type: IncidentType::Inspection,
        maintenance_type: None,
        severity: 5.0,
        cost_usd: 10_000.0,
        downtime_hours: 12.0,
    }
}
