//! Fee constants shared by all network presets.

use crate::complexity::Dimensions;

/// Bandwidth, db read, db write, compute
pub const DEFAULT_FEE_WEIGHTS: Dimensions = Dimensions::new(1, 1_000, 1_000, 4);

/// Smallest accepted price per unit of gas
pub const DEFAULT_MIN_GAS_PRICE: u64 = 1;

/// Gas capacity of the fee market. Not enforced when building transactions.
pub const DEFAULT_MAX_GAS_CAPACITY: u64 = 1_000_000;
