#![deny(warnings)]
#![deny(rust_2018_idioms)]

pub mod csv_store;
pub mod helper;
