use super::AddressMaps;
use crate::imports::*;
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Outcome of a successful spend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendResult {
    /// Selected inputs ordered by outpoint
    pub inputs: Vec<TransactionInput>,
    /// The UTXO spent by each input, in input order
    pub input_utxos: Vec<UtxoEntry>,
    pub change_outputs: Vec<TransactionOutput>,
    pub stake_outputs: Vec<TransactionOutput>,
    /// Fee asset amount actually paid. May exceed `required_fee` when a
    /// change output would have cost more than it returned.
    pub fee: u64,
    pub required_fee: u64,
    pub complexity: Dimensions,
    pub address_maps: AddressMaps,
    pub to_burn: BTreeMap<AssetId, Amount>,
    pub to_stake: BTreeMap<AssetId, Amount>,
}

impl SpendResult {
    /// Fee paid beyond the required fee.
    pub fn surplus_fee(&self) -> u64 {
        self.fee.saturating_sub(self.required_fee)
    }

    /// Total input amount of `asset_id`
    pub fn input_amount(&self, asset_id: &AssetId) -> u128 {
        self.inputs.iter().filter(|input| &input.asset_id == asset_id).map(|input| input.amount() as u128).sum()
    }

    /// Total amount of `asset_id` across change and staked outputs
    pub fn output_amount(&self, asset_id: &AssetId) -> u128 {
        self.change_outputs
            .iter()
            .chain(self.stake_outputs.iter())
            .filter(|output| &output.asset_id == asset_id)
            .map(|output| output.amount() as u128)
            .sum()
    }
}

impl Display for SpendResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "inputs: {} change outputs: {} stake outputs: {} fee: {} (required {}) complexity: {}",
            self.inputs.len(),
            self.change_outputs.len(),
            self.stake_outputs.len(),
            self.fee,
            self.required_fee,
            self.complexity
        )
    }
}
