extern crate self as spendkit_core;

pub mod log;
pub mod time;
