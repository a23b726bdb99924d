//!
//! # Spendkit wallet core
//!
//! UTXO spend engine: selects unspent outputs to satisfy the amounts a
//! transaction has to burn and stake, prices the transaction with the
//! complexity fee model and produces the inputs, change and staked outputs
//! together with the address maps a signer needs.
//!
//! ```ignore
//! use spendkit_wallet_core::tx::{spend, SpendSettings};
//!
//! let settings = SpendSettings::new(fee_asset_id, utxos, controlled_addresses, initial_complexity, &params)
//!     .burn(asset_id, 1_000)
//!     .stake(asset_id, 2_000_000);
//! let result = spend(settings)?;
//! ```
//!

extern crate self as spendkit_wallet_core;

pub mod error;
pub mod imports;
pub mod result;
pub mod tx;

pub use error::Error;
pub use result::Result;
