#![deny(warnings)]
#![deny(rust_2018_idioms)]

mod csv_store;
mod deserialize_utils;
pub mod error;
mod join;
mod models;

pub use csv_store::*;
pub use error::*;
pub use join::*;
pub use models::*;
