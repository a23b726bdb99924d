//!
//! Transaction construction: UTXO selection, fee resolution and signature placement.
//!

pub mod spend;

pub use self::spend::*;
