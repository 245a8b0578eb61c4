use crate::RiskFactorId;
use snafu::{Location, Snafu};

pub type Result<T> = std::result::Result<T, Error>;

/// Configuration faults, all of them fatal before any vessel is processed.
#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum Error {
    #[snafu(display("Risk weight of '{factor}' must be finite and non-negative, got '{value}'"))]
    InvalidWeight {
        #[snafu(implicit)]
        location: Location,
        factor: RiskFactorId,
        value: f64,
    },
    #[snafu(display("Risk weights must sum to a positive total, got '{total}'"))]
    WeightSum {
        #[snafu(implicit)]
        location: Location,
        total: f64,
    },
    #[snafu(display(
        "Risk thresholds must be finite and strictly ascending, got '[{medium}, {high}, {critical}]'"
    ))]
    Thresholds {
        #[snafu(implicit)]
        location: Location,
        medium: f64,
        high: f64,
        critical: f64,
    },
    #[snafu(display("Configuration value '{name}' is out of range, got '{value}'"))]
    OutOfRange {
        #[snafu(implicit)]
        location: Location,
        name: &'static str,
        value: f64,
    },
    #[snafu(display("Configuration duration '{name}' must be positive"))]
    ZeroDuration {
        #[snafu(implicit)]
        location: Location,
        name: &'static str,
    },
}
