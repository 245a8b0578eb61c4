#![deny(warnings)]
#![deny(rust_2018_idioms)]

mod engine;
pub mod error;
mod insights;
mod metrics;
mod partition;
mod risk;
mod stats;

pub use engine::*;
pub use error::*;
pub use insights::*;
pub use metrics::*;
pub use partition::*;
pub use risk::*;
pub use stats::*;
