//!
//! [`SpendSettings`] carry everything a single [`spend`](super::spend) call needs.
//!

use crate::imports::*;
use serde::{Deserialize, Serialize};

/// Optional spend parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendOptions {
    /// Time (unix seconds) at which the transaction is considered issued;
    /// lock times are evaluated against it. Defaults to the current time.
    pub min_issuance_time: Option<u64>,
    /// Owners of change outputs. Defaults to the first controlled address.
    pub change_owners: Option<OutputOwners>,
}

#[derive(Debug, Clone)]
pub struct SpendSettings {
    // complexity of the transaction before any input or output is added
    pub initial_complexity: Dimensions,
    // amounts per asset that the transaction has to burn
    pub to_burn: BTreeMap<AssetId, Amount>,
    // amounts per asset that the transaction has to stake
    pub to_stake: BTreeMap<AssetId, Amount>,
    // candidate UTXOs, considered in this order
    pub utxos: Vec<UtxoEntry>,
    // addresses the caller can sign with
    pub controlled_addresses: Vec<Address>,
    // asset that pays the fee
    pub fee_asset_id: AssetId,
    pub gas_price: u64,
    pub weights: Dimensions,
    pub options: SpendOptions,
}

impl SpendSettings {
    /// Settings priced with the minimal gas price and weights of `params`,
    /// with empty burn and stake requirements.
    pub fn new(
        fee_asset_id: AssetId,
        utxos: Vec<UtxoEntry>,
        controlled_addresses: Vec<Address>,
        initial_complexity: Dimensions,
        params: &Params,
    ) -> Self {
        Self {
            initial_complexity,
            to_burn: BTreeMap::new(),
            to_stake: BTreeMap::new(),
            utxos,
            controlled_addresses,
            fee_asset_id,
            gas_price: params.min_gas_price,
            weights: params.weights,
            options: SpendOptions::default(),
        }
    }

    /// Sets the amount of `asset_id` to burn.
    pub fn burn(mut self, asset_id: AssetId, amount: Amount) -> Self {
        self.to_burn.insert(asset_id, amount);
        self
    }

    /// Sets the amount of `asset_id` to stake.
    pub fn stake(mut self, asset_id: AssetId, amount: Amount) -> Self {
        self.to_stake.insert(asset_id, amount);
        self
    }

    pub fn with_gas_price(mut self, gas_price: u64) -> Self {
        self.gas_price = gas_price;
        self
    }

    pub fn with_min_issuance_time(mut self, min_issuance_time: u64) -> Self {
        self.options.min_issuance_time = Some(min_issuance_time);
        self
    }

    pub fn with_change_owners(mut self, change_owners: OutputOwners) -> Self {
        self.options.change_owners = Some(change_owners);
        self
    }

    pub fn min_issuance_time(&self) -> u64 {
        self.options.min_issuance_time.unwrap_or_else(spendkit_core::time::unix_now_secs)
    }

    /// Change owners, falling back to a single owner over the first
    /// controlled address.
    pub fn change_owners(&self) -> Result<OutputOwners> {
        match (&self.options.change_owners, self.controlled_addresses.first()) {
            (Some(owners), _) => Ok(owners.clone()),
            (None, Some(address)) => Ok(OutputOwners::single(*address)),
            (None, None) => Err(Error::structural("no change owners and no controlled addresses")),
        }
    }
}
