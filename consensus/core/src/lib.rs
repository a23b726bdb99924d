//!
//! # Spendkit consensus core
//!
//! Transaction data model, canonical encoding, complexity estimation and
//! network fee parameters.
//!

pub mod codec;
pub mod complexity;
pub mod config;
pub mod network;
pub mod tx;

pub use config::params::Params;
