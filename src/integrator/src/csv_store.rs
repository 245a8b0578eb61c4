use crate::{
    EnvironmentRow, Error, FuelRow, IntoRecord, MaintenanceRow, NavigationRow, Result, VesselRow,
    error::error::{CsvSnafu, IoSnafu, MissingFileSnafu},
};
use fleet_core::{
    EnvironmentSample, FuelRecord, MaintenanceIncident, NavigationEvent, RecordStore,
    VesselRecord,
};
use serde::de::DeserializeOwned;
use snafu::ResultExt;
use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};
use tracing::{info, warn};

pub static VESSELS_FILE: &str = "vessel_specifications.csv";
pub static NAVIGATION_FILE: &str = "navigation_logs.csv";
pub static ENVIRONMENT_FILE: &str = "environmental_conditions.csv";
pub static FUEL_FILE: &str = "fuel_consumption.csv";
pub static MAINTENANCE_FILE: &str = "maintenance_incidents.csv";

/// Loads the record collections from CSV files in a single directory.
///
/// Only the vessel specification file is required, any other missing file is
/// treated as an empty collection.
#[derive(Debug, Clone)]
pub struct CsvRecordStore {
    dir: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Presence {
    Required,
    Optional,
}

impl CsvRecordStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn load<R>(&self, file: &'static str, presence: Presence) -> Result<Vec<R::Record>>
    where
        R: DeserializeOwned + IntoRecord,
    {
        let path = self.dir.join(file);
        if !path.exists() {
            return match presence {
                Presence::Required => MissingFileSnafu { path }.fail(),
                Presence::Optional => {
                    warn!("'{}' not found, continuing without it", path.display());
                    Ok(Vec::new())
                }
            };
        }

        let reader = File::open(&path).context(IoSnafu { path: path.clone() })?;
        let records = decode::<R>(reader, file)?;
        info!("loaded {} records from '{}'", records.len(), path.display());

        Ok(records)
    }
}

/// Decodes every row of a CSV document with a header line.
pub fn decode<R>(reader: impl Read, file: &'static str) -> Result<Vec<R::Record>>
where
    R: DeserializeOwned + IntoRecord,
{
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
        .into_deserialize::<R>()
        .map(|row| row.context(CsvSnafu { file })?.into_record())
        .collect()
}

impl RecordStore for CsvRecordStore {
    type Error = Error;

    fn vessels(&self) -> Result<Vec<VesselRecord>> {
        self.load::<VesselRow>(VESSELS_FILE, Presence::Required)
    }

    fn navigation(&self) -> Result<Vec<NavigationEvent>> {
        self.load::<NavigationRow>(NAVIGATION_FILE, Presence::Optional)
    }

    fn environment(&self) -> Result<Vec<EnvironmentSample>> {
        self.load::<EnvironmentRow>(ENVIRONMENT_FILE, Presence::Optional)
    }

    fn fuel(&self) -> Result<Vec<FuelRecord>> {
        self.load::<FuelRow>(FUEL_FILE, Presence::Optional)
    }

    fn maintenance(&self) -> Result<Vec<MaintenanceIncident>> {
        self.load::<MaintenanceRow>(MAINTENANCE_FILE, Presence::Optional)
    }
}
