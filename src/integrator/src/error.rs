use chrono::{DateTime, Utc};
use fleet_core::VesselId;
use snafu::{Location, Snafu};
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum Error {
    #[snafu(display("Required data file '{}' does not exist", path.display()))]
    MissingFile {
        #[snafu(implicit)]
        location: Location,
        path: PathBuf,
    },
    #[snafu(display("Failed to open data file '{}'", path.display()))]
    Io {
        #[snafu(implicit)]
        location: Location,
        path: PathBuf,
        #[snafu(source)]
        error: std::io::Error,
    },
    #[snafu(display("Failed to decode records of '{file}'"))]
    Csv {
        #[snafu(implicit)]
        location: Location,
        file: &'static str,
        #[snafu(source)]
        error: csv::Error,
    },
    #[snafu(display(
        "Maintenance incident of '{vessel_id}' at '{timestamp}' has neither a severity nor a risk category"
    ))]
    MissingSeverity {
        #[snafu(implicit)]
        location: Location,
        vessel_id: VesselId,
        timestamp: DateTime<Utc>,
    },
}
