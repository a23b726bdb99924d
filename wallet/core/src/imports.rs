//!
//! Most common imports used internally by the wallet core.
//!

pub use crate::error::{Error, Purpose, SpendStage};
pub use crate::result::Result;
pub use ahash::{AHashMap, AHashSet};
pub use itertools::Itertools;
pub use spendkit_consensus_core::complexity::{self, Dimensions};
pub use spendkit_consensus_core::config::params::Params;
pub use spendkit_consensus_core::tx::{
    Address, Amount, AssetId, Input, Output, OutputOwners, StakeableLockInput, TransactionInput, TransactionOutpoint,
    TransactionOutput, TransferInput, TransferOutput, UtxoEntry,
};
pub use spendkit_core::{debug, trace};
pub use std::collections::BTreeMap;
