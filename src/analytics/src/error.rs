use snafu::{Location, Snafu};
use tokio::task::JoinError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum Error {
    #[snafu(display("Invalid analytics configuration"))]
    Config {
        #[snafu(implicit)]
        location: Location,
        source: fleet_core::Error,
    },
    #[snafu(display("Failed to join metric workers"))]
    Join {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: JoinError,
    },
    #[snafu(display("Metric workers exited before all vessels were handed out"))]
    WorkerChannel {
        #[snafu(implicit)]
        location: Location,
    },
}
