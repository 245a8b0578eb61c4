#![deny(warnings)]
#![deny(rust_2018_idioms)]

mod config;
mod domain;
pub mod error;
mod mean;
mod ports;

#[cfg(feature = "test")]
pub mod test_helper;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use mean::*;
pub use ports::*;
