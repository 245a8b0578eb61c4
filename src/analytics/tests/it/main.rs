#![deny(warnings)]
#![deny(rust_2018_idioms)]

pub mod engine;
pub mod helper;
pub mod insights;
pub mod risk;
