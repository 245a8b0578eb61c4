use snafu::{Location, Snafu};
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum Error {
    #[snafu(display("Failed to load fleet records"))]
    Records {
        #[snafu(implicit)]
        location: Location,
        source: integrator::Error,
    },
    #[snafu(display("Analytics run failed"))]
    Analytics {
        #[snafu(implicit)]
        location: Location,
        source: analytics::Error,
    },
    #[snafu(display("Failed to write '{}'", path.display()))]
    Io {
        #[snafu(implicit)]
        location: Location,
        path: PathBuf,
        #[snafu(source)]
        error: std::io::Error,
    },
    #[snafu(display("Failed to serialize '{}'", path.display()))]
    Json {
        #[snafu(implicit)]
        location: Location,
        path: PathBuf,
        #[snafu(source)]
        error: serde_json::Error,
    },
}
