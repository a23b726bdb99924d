//!
//! Address maps: where each controlled address has to place its signature.
//!

use super::match_owners;
use crate::imports::*;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Signature placement within one input: address to credential slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddressMap(IndexMap<Address, u32>);

impl AddressMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, address: Address, slot_index: u32) -> Option<u32> {
        self.0.insert(address, slot_index)
    }

    pub fn get(&self, address: &Address) -> Option<u32> {
        self.0.get(address).copied()
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.0.contains_key(address)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Address, u32)> {
        self.0.iter().map(|(address, slot)| (address, *slot))
    }

    /// Credential slots in insertion order
    pub fn indices(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.values().copied()
    }
}

impl FromIterator<(Address, u32)> for AddressMap {
    fn from_iter<T: IntoIterator<Item = (Address, u32)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Location of one signature: input position and credential slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigCoordinate {
    pub input_index: usize,
    pub slot_index: u32,
}

/// One [`AddressMap`] per transaction input, plus the reverse index from an
/// address to every place it signs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressMaps {
    maps: Vec<AddressMap>,
    index: IndexMap<Address, Vec<SigCoordinate>>,
}

impl AddressMaps {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the map of the next input.
    pub fn push(&mut self, map: AddressMap) {
        let input_index = self.maps.len();
        for (address, slot_index) in map.iter() {
            self.index.entry(*address).or_default().push(SigCoordinate { input_index, slot_index });
        }
        self.maps.push(map);
    }

    /// Appends all maps of `other`, whose inputs follow the inputs of `self`.
    pub fn merge(&mut self, other: AddressMaps) {
        for map in other.maps {
            self.push(map);
        }
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.index.contains_key(address)
    }

    /// Addresses that need to sign, in first-use order
    pub fn addresses(&self) -> impl Iterator<Item = &Address> {
        self.index.keys()
    }

    pub fn get_sig_indices_for_address(&self, address: &Address) -> Option<&[SigCoordinate]> {
        self.index.get(address).map(Vec::as_slice)
    }

    pub fn get(&self, input_index: usize) -> Option<&AddressMap> {
        self.maps.get(input_index)
    }

    pub fn iter_maps(&self) -> impl Iterator<Item = &AddressMap> {
        self.maps.iter()
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }

    /// Rebuilds the maps of already selected `inputs` from the signature
    /// indices they carry.
    pub fn from_transaction_inputs(
        inputs: &[TransactionInput],
        utxos: &[UtxoEntry],
        min_issuance_time: u64,
        controlled: &AHashSet<Address>,
    ) -> Result<Self> {
        let utxos = utxos.iter().map(|utxo| (utxo.outpoint, utxo)).collect::<AHashMap<_, _>>();

        let mut maps = AddressMaps::new();
        for input in inputs {
            let utxo =
                utxos.get(&input.outpoint).ok_or_else(|| Error::structural(format!("no UTXO for input {}", input.outpoint)))?;
            let owners =
                utxo.owners().ok_or_else(|| Error::structural(format!("UTXO {} has an unsupported output", utxo.outpoint)))?;
            let found = match_owners(owners, controlled, min_issuance_time, Some(input.sig_indices())).ok_or_else(|| {
                Error::structural(format!("signature indices of input {} can not be satisfied", input.outpoint))
            })?;
            maps.push(found.address_map);
        }
        Ok(maps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address(b: u8) -> Address {
        Address::new([b; 20])
    }

    #[test]
    fn test_push_builds_index() {
        let mut maps = AddressMaps::new();
        maps.push([(address(1), 0), (address(2), 1)].into_iter().collect());
        maps.push([(address(2), 0)].into_iter().collect());

        let mut other = AddressMaps::new();
        other.push([(address(3), 0), (address(1), 1)].into_iter().collect());
        maps.merge(other);

        assert_eq!(maps.len(), 3);
        assert_eq!(maps.addresses().copied().collect::<Vec<_>>(), vec![address(1), address(2), address(3)]);
        assert_eq!(
            maps.get_sig_indices_for_address(&address(1)),
            Some(&[SigCoordinate { input_index: 0, slot_index: 0 }, SigCoordinate { input_index: 2, slot_index: 1 }][..])
        );
        assert_eq!(
            maps.get_sig_indices_for_address(&address(2)),
            Some(&[SigCoordinate { input_index: 0, slot_index: 1 }, SigCoordinate { input_index: 1, slot_index: 0 }][..])
        );
        assert!(maps.get_sig_indices_for_address(&address(9)).is_none());
        assert!(maps.contains(&address(3)));
        assert_eq!(maps.get(1).map(|map| map.indices().collect::<Vec<_>>()), Some(vec![0]));
        assert_eq!(maps.iter_maps().map(AddressMap::len).sum::<usize>(), 5);
    }

    #[test]
    fn test_from_transaction_inputs() {
        let owners = OutputOwners::try_new(0, 2, [address(1), address(2), address(3)]).unwrap();
        let utxo = UtxoEntry::new(TransactionOutpoint::new(1.into(), 0), 9.into(), TransactionOutput::transfer(9.into(), 10, owners).output);
        let input = TransactionInput::new(utxo.outpoint, utxo.asset_id, TransferInput::new(10, vec![1, 2]).into());
        let controlled = [address(2), address(3)].into_iter().collect::<AHashSet<_>>();

        let maps = AddressMaps::from_transaction_inputs(&[input.clone()], &[utxo.clone()], 0, &controlled).unwrap();
        assert_eq!(maps.get(0).and_then(|map| map.get(&address(3))), Some(1));

        let unknown = TransactionInput::new(TransactionOutpoint::new(2.into(), 0), utxo.asset_id, TransferInput::new(1, vec![0]).into());
        assert!(AddressMaps::from_transaction_inputs(&[unknown], &[utxo.clone()], 0, &controlled).unwrap_err().is_structural());

        let only_one = [address(3)].into_iter().collect::<AHashSet<_>>();
        assert!(AddressMaps::from_transaction_inputs(&[input], &[utxo], 0, &only_one).is_err());
    }
}
