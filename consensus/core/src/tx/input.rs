use super::{Amount, AssetId, TransactionOutpoint};
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// Spends a transfer output. `sig_indices` are the owner slots that will
/// sign, in ascending order.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferInput {
    pub amount: Amount,
    pub sig_indices: Vec<u32>,
}

impl TransferInput {
    pub fn new(amount: Amount, sig_indices: Vec<u32>) -> Self {
        Self { amount, sig_indices }
    }
}

/// Spends a still locked stakeable output. The lock carries over to the
/// outputs the value is moved to.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
#[serde(rename_all = "camelCase")]
pub struct StakeableLockInput {
    pub locktime: u64,
    pub transfer_input: TransferInput,
}

impl StakeableLockInput {
    pub fn new(locktime: u64, transfer_input: TransferInput) -> Self {
        Self { locktime, transfer_input }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum Input {
    Transfer(TransferInput),
    StakeableLock(StakeableLockInput),
}

impl Input {
    pub fn transfer_input(&self) -> &TransferInput {
        match self {
            Input::Transfer(input) => input,
            Input::StakeableLock(input) => &input.transfer_input,
        }
    }

    pub fn amount(&self) -> Amount {
        self.transfer_input().amount
    }

    pub fn sig_indices(&self) -> &[u32] {
        &self.transfer_input().sig_indices
    }

    pub fn is_stakeable_lock(&self) -> bool {
        matches!(self, Input::StakeableLock(_))
    }
}

impl From<TransferInput> for Input {
    fn from(input: TransferInput) -> Self {
        Input::Transfer(input)
    }
}

impl From<StakeableLockInput> for Input {
    fn from(input: StakeableLockInput) -> Self {
        Input::StakeableLock(input)
    }
}

/// An input together with the UTXO it consumes.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInput {
    pub outpoint: TransactionOutpoint,
    pub asset_id: AssetId,
    pub input: Input,
}

impl TransactionInput {
    pub fn new(outpoint: TransactionOutpoint, asset_id: AssetId, input: Input) -> Self {
        Self { outpoint, asset_id, input }
    }

    pub fn amount(&self) -> Amount {
        self.input.amount()
    }

    pub fn sig_indices(&self) -> &[u32] {
        self.input.sig_indices()
    }
}
