#![deny(warnings)]
#![deny(rust_2018_idioms)]

pub mod error;
pub mod settings;
pub mod startup;

pub use error::*;
pub use settings::*;
pub use startup::*;
