//!
//! [`SpendLedger`] tracks the state of a single spend: selected inputs,
//! produced outputs and the remaining burn and stake requirements.
//!

use super::{AddressMap, AddressMaps, SpendResult, consolidate_outputs};
use crate::imports::*;
use spendkit_consensus_core::complexity::{input_complexity, outputs_complexity};

pub struct SpendLedger {
    fee_asset_id: AssetId,
    gas_price: u64,
    weights: Dimensions,
    initial_complexity: Dimensions,

    // selected inputs with the UTXO each one spends and its signature placement
    inputs: Vec<TransactionInput>,
    input_utxos: Vec<UtxoEntry>,
    input_address_maps: Vec<AddressMap>,
    // running complexity of `inputs`
    inputs_complexity: Dimensions,

    change_outputs: Vec<TransactionOutput>,
    stake_outputs: Vec<TransactionOutput>,

    to_burn: BTreeMap<AssetId, Amount>,
    to_stake: BTreeMap<AssetId, Amount>,
}

impl SpendLedger {
    pub fn new(
        fee_asset_id: AssetId,
        gas_price: u64,
        weights: Dimensions,
        initial_complexity: Dimensions,
        to_burn: BTreeMap<AssetId, Amount>,
        to_stake: BTreeMap<AssetId, Amount>,
    ) -> Self {
        Self {
            fee_asset_id,
            gas_price,
            weights,
            initial_complexity,
            inputs: Vec::new(),
            input_utxos: Vec::new(),
            input_address_maps: Vec::new(),
            inputs_complexity: Dimensions::ZERO,
            change_outputs: Vec::new(),
            stake_outputs: Vec::new(),
            to_burn,
            to_stake,
        }
    }

    #[inline(always)]
    pub fn fee_asset_id(&self) -> &AssetId {
        &self.fee_asset_id
    }

    pub fn inputs(&self) -> &[TransactionInput] {
        &self.inputs
    }

    pub fn change_outputs(&self) -> &[TransactionOutput] {
        &self.change_outputs
    }

    pub fn stake_outputs(&self) -> &[TransactionOutput] {
        &self.stake_outputs
    }

    /// Remaining amount of `asset_id` to burn
    pub fn to_burn(&self, asset_id: &AssetId) -> Amount {
        self.to_burn.get(asset_id).copied().unwrap_or_default()
    }

    /// Remaining amount of `asset_id` to stake
    pub fn to_stake(&self, asset_id: &AssetId) -> Amount {
        self.to_stake.get(asset_id).copied().unwrap_or_default()
    }

    pub fn add_input(&mut self, utxo: &UtxoEntry, input: TransactionInput, address_map: AddressMap) -> Result<()> {
        self.inputs_complexity =
            self.inputs_complexity.checked_add(&input_complexity(&input)).ok_or_else(|| Error::overflow("input complexity"))?;
        self.inputs.push(input);
        self.input_utxos.push(utxo.clone());
        self.input_address_maps.push(address_map);
        Ok(())
    }

    /// Output complexity is accounted for lazily, on the next fee calculation.
    pub fn add_change_output(&mut self, output: TransactionOutput) {
        self.change_outputs.push(output);
    }

    pub fn add_stake_output(&mut self, output: TransactionOutput) {
        self.stake_outputs.push(output);
    }

    pub fn should_consume_locked_asset(&self, asset_id: &AssetId) -> bool {
        self.to_stake(asset_id) > 0
    }

    pub fn should_consume_asset(&self, asset_id: &AssetId) -> bool {
        self.to_burn(asset_id) > 0 || self.should_consume_locked_asset(asset_id)
    }

    /// Applies `amount` to the stake requirement of `asset_id` and returns the unused remainder.
    pub fn consume_locked_asset(&mut self, asset_id: &AssetId, amount: Amount) -> Amount {
        consume(&mut self.to_stake, asset_id, amount)
    }

    /// Applies `amount` to the burn requirement first and then to the stake
    /// requirement of `asset_id`. Returns the unused remainder.
    pub fn consume_asset(&mut self, asset_id: &AssetId, amount: Amount) -> Amount {
        let remaining = consume(&mut self.to_burn, asset_id, amount);
        self.consume_locked_asset(asset_id, remaining)
    }

    pub fn consolidate_outputs(&mut self) -> Result<()> {
        self.change_outputs = consolidate_outputs(std::mem::take(&mut self.change_outputs))?;
        self.stake_outputs = consolidate_outputs(std::mem::take(&mut self.stake_outputs))?;
        Ok(())
    }

    /// Total complexity of the transaction as it stands, optionally with an
    /// additional output that is not recorded.
    pub fn complexity(&mut self, temporary_output: Option<&TransactionOutput>) -> Result<Dimensions> {
        self.consolidate_outputs()?;
        let outputs = outputs_complexity(self.change_outputs.iter().chain(self.stake_outputs.iter()).chain(temporary_output))
            .ok_or_else(|| Error::overflow("output complexity"))?;
        Dimensions::checked_sum([self.initial_complexity, self.inputs_complexity, outputs])
            .ok_or_else(|| Error::overflow("transaction complexity"))
    }

    /// Fee of the transaction as it stands, optionally priced with an
    /// additional output that is not recorded.
    pub fn calculate_fee(&mut self, temporary_output: Option<&TransactionOutput>) -> Result<u64> {
        let complexity = self.complexity(temporary_output)?;
        self.fee_for(&complexity)
    }

    pub fn fee_for(&self, complexity: &Dimensions) -> Result<u64> {
        complexity
            .to_gas(&self.weights)
            .and_then(|gas| gas.checked_mul(self.gas_price))
            .ok_or_else(|| Error::overflow("transaction fee"))
    }

    /// Fails with the first unmet requirement, stake requirements first.
    pub fn verify_assets_consumed(&self) -> Result<()> {
        let unmet = |table: &BTreeMap<AssetId, Amount>, purpose: Purpose| {
            table.iter().find(|(_, remaining)| **remaining > 0).map(|(asset_id, remaining)| Error::InsufficientFunds {
                asset_id: *asset_id,
                purpose,
                shortfall: *remaining,
            })
        };

        match unmet(&self.to_stake, Purpose::Stake).or_else(|| unmet(&self.to_burn, Purpose::Burn)) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Plain change output of the fee asset paying `owners`, if one exists.
    pub fn fee_change_output_mut(&mut self, owners: &OutputOwners) -> Option<&mut TransactionOutput> {
        let fee_asset_id = self.fee_asset_id;
        self.change_outputs.iter_mut().find(|output| {
            output.asset_id == fee_asset_id && matches!(&output.output, Output::Transfer(transfer) if &transfer.owners == owners)
        })
    }

    /// Final snapshot. Inputs are ordered by outpoint and outputs by asset
    /// and encoded bytes; address maps follow the input order.
    pub fn into_result(mut self, fee: u64) -> Result<SpendResult> {
        let complexity = self.complexity(None)?;
        let required_fee = self.fee_for(&complexity)?;

        let (inputs, input_utxos, maps): (Vec<_>, Vec<_>, Vec<_>) =
            itertools::multiunzip(
                itertools::multizip((self.inputs, self.input_utxos, self.input_address_maps))
                    .sorted_by_key(|(input, _, _)| input.outpoint),
            );

        let mut address_maps = AddressMaps::new();
        maps.into_iter().for_each(|map| address_maps.push(map));

        Ok(SpendResult {
            inputs,
            input_utxos,
            change_outputs: sort_outputs(self.change_outputs),
            stake_outputs: sort_outputs(self.stake_outputs),
            fee,
            required_fee,
            complexity,
            address_maps,
            to_burn: self.to_burn,
            to_stake: self.to_stake,
        })
    }
}

fn consume(table: &mut BTreeMap<AssetId, Amount>, asset_id: &AssetId, amount: Amount) -> Amount {
    match table.get_mut(asset_id) {
        Some(remaining) => {
            let consumed = amount.min(*remaining);
            *remaining -= consumed;
            amount - consumed
        }
        None => amount,
    }
}

fn sort_outputs(outputs: Vec<TransactionOutput>) -> Vec<TransactionOutput> {
    use spendkit_consensus_core::codec::Encode;
    outputs.into_iter().sorted_by_cached_key(|output| (output.asset_id, output.to_bytes())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owners(b: u8) -> OutputOwners {
        OutputOwners::single(Address::new([b; 20]))
    }

    fn ledger(to_burn: &[(u64, u64)], to_stake: &[(u64, u64)]) -> SpendLedger {
        let table = |items: &[(u64, u64)]| items.iter().map(|(asset, amount)| (AssetId::from(*asset), *amount)).collect();
        SpendLedger::new(AssetId::from(100), 1, Dimensions::new(1, 1000, 1000, 4), Dimensions::ZERO, table(to_burn), table(to_stake))
    }

    #[test]
    fn test_consume_burn_before_stake() {
        let a = AssetId::from(1);
        let mut ledger = ledger(&[(1, 30)], &[(1, 50)]);
        assert!(ledger.should_consume_asset(&a));
        assert!(ledger.should_consume_locked_asset(&a));

        assert_eq!(ledger.consume_asset(&a, 20), 0);
        assert_eq!((ledger.to_burn(&a), ledger.to_stake(&a)), (10, 50));
        assert_eq!(ledger.consume_asset(&a, 100), 40);
        assert_eq!((ledger.to_burn(&a), ledger.to_stake(&a)), (0, 0));
        assert!(!ledger.should_consume_asset(&a));

        // unknown assets pass through untouched
        assert_eq!(ledger.consume_asset(&AssetId::from(2), 7), 7);
        assert_eq!(ledger.consume_locked_asset(&AssetId::from(2), 7), 7);
    }

    #[test]
    fn test_locked_consumption_only_stakes() {
        let a = AssetId::from(1);
        let mut ledger = ledger(&[(1, 30)], &[(1, 50)]);
        assert_eq!(ledger.consume_locked_asset(&a, 80), 30);
        assert_eq!((ledger.to_burn(&a), ledger.to_stake(&a)), (30, 0));
        assert!(!ledger.should_consume_locked_asset(&a));
        assert!(ledger.should_consume_asset(&a));
    }

    #[test]
    fn test_verify_reports_stake_first() {
        let mut ledger = ledger(&[(1, 5)], &[(2, 6)]);
        assert_eq!(
            ledger.verify_assets_consumed(),
            Err(Error::InsufficientFunds { asset_id: 2.into(), purpose: Purpose::Stake, shortfall: 6 })
        );
        ledger.consume_locked_asset(&2.into(), 6);
        assert_eq!(
            ledger.verify_assets_consumed(),
            Err(Error::InsufficientFunds { asset_id: 1.into(), purpose: Purpose::Burn, shortfall: 5 })
        );
        ledger.consume_asset(&1.into(), 5);
        assert_eq!(ledger.verify_assets_consumed(), Ok(()));
    }

    #[test]
    fn test_fee_consolidates_before_counting() {
        let mut ledger = ledger(&[], &[]);
        let output = TransactionOutput::transfer(1.into(), 10, owners(1));
        let single_output_fee = ledger.calculate_fee(Some(&output)).unwrap();
        assert_eq!(single_output_fee, 80 + 1000);

        ledger.add_change_output(output.clone());
        ledger.add_change_output(output.clone());
        assert_eq!(ledger.calculate_fee(None).unwrap(), single_output_fee);
        assert_eq!(ledger.change_outputs(), &[TransactionOutput::transfer(1.into(), 20, owners(1))]);

        // the temporary output is priced but not recorded
        let other = TransactionOutput::transfer(1.into(), 0, owners(2));
        assert_eq!(ledger.calculate_fee(Some(&other)).unwrap(), 2 * single_output_fee);
        assert_eq!(ledger.change_outputs().len(), 1);
    }

    #[test]
    fn test_fee_overflow_is_structural() {
        let mut ledger = SpendLedger::new(
            AssetId::from(100),
            u64::MAX,
            Dimensions::new(1, 1, 1, 1),
            Dimensions::from_bandwidth(2),
            BTreeMap::new(),
            BTreeMap::new(),
        );
        assert!(ledger.calculate_fee(None).unwrap_err().is_structural());
    }

    #[test]
    fn test_complexity_overflow_is_structural() {
        let initial = Dimensions::from_bandwidth(u64::MAX - 10);
        let mut ledger = SpendLedger::new(AssetId::from(100), 0, Dimensions::new(1, 1, 1, 1), initial, BTreeMap::new(), BTreeMap::new());
        assert_eq!(ledger.complexity(None), Ok(initial));

        let output = TransactionOutput::transfer(1.into(), 10, owners(1));
        assert!(ledger.complexity(Some(&output)).unwrap_err().is_structural());
        ledger.add_change_output(output);
        assert!(ledger.calculate_fee(None).unwrap_err().is_structural());
    }

    #[test]
    fn test_fee_change_output_lookup() {
        let mut ledger = ledger(&[], &[]);
        ledger.add_change_output(TransactionOutput::stakeable_lock(100.into(), 5, 1, owners(1)));
        ledger.add_change_output(TransactionOutput::transfer(1.into(), 1, owners(1)));
        assert!(ledger.fee_change_output_mut(&owners(1)).is_none());

        ledger.add_change_output(TransactionOutput::transfer(100.into(), 1, owners(1)));
        assert!(ledger.fee_change_output_mut(&owners(2)).is_none());
        assert_eq!(ledger.fee_change_output_mut(&owners(1)).map(|output| output.amount()), Some(1));
    }
}
