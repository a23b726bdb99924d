//!
//! Transaction data model: owners, outputs, inputs, UTXO entries and credentials.
//!

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub use spendkit_addresses::Address;
pub use spendkit_hashes::Hash;

mod credential;
mod input;
mod output;
mod owners;
mod utxo;

pub use credential::*;
pub use input::*;
pub use output::*;
pub use owners::*;
pub use utxo::*;

/// Represents the ID of a transaction
pub type TransactionId = Hash;

/// Represents the ID of an asset
pub type AssetId = Hash;

/// Index of an output within the transaction that created it
pub type TransactionIndexType = u32;

/// Amount of an asset in its smallest denomination
pub type Amount = u64;

/// Identifies a UTXO by the transaction that created it and the output index.
///
/// The derived ordering (transaction id bytes, then index) is the canonical
/// input ordering of a transaction.
#[derive(Eq, Hash, PartialEq, PartialOrd, Ord, Debug, Copy, Clone, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionOutpoint {
    pub transaction_id: TransactionId,
    pub index: TransactionIndexType,
}

impl TransactionOutpoint {
    pub fn new(transaction_id: TransactionId, index: TransactionIndexType) -> Self {
        Self { transaction_id, index }
    }
}

impl Display for TransactionOutpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.transaction_id, self.index)
    }
}
