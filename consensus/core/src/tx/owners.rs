use super::Address;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OwnersError {
    #[error("threshold {threshold} exceeds the number of owner addresses {addresses}")]
    ThresholdExceedsAddresses { threshold: u32, addresses: usize },

    #[error("owners with {0} addresses and zero threshold are unspendable")]
    ZeroThreshold(usize),
}

/// Owner terms of an output: who can spend it, how many of them must sign
/// and from which time on.
///
/// Addresses are kept sorted in ascending byte order and deduplicated; the
/// position of an address in this list is its signature slot index.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, BorshSerialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputOwners {
    locktime: u64,
    threshold: u32,
    addresses: Vec<Address>,
}

impl OutputOwners {
    pub fn try_new(locktime: u64, threshold: u32, addresses: impl IntoIterator<Item = Address>) -> Result<Self, OwnersError> {
        let mut addresses = addresses.into_iter().collect::<Vec<_>>();
        addresses.sort_unstable();
        addresses.dedup();

        if threshold as usize > addresses.len() {
            return Err(OwnersError::ThresholdExceedsAddresses { threshold, addresses: addresses.len() });
        }
        if threshold == 0 && !addresses.is_empty() {
            return Err(OwnersError::ZeroThreshold(addresses.len()));
        }

        Ok(Self { locktime, threshold, addresses })
    }

    /// A single unlocked owner, the usual shape of change owners.
    pub fn single(address: Address) -> Self {
        Self { locktime: 0, threshold: 1, addresses: vec![address] }
    }

    #[inline(always)]
    pub fn locktime(&self) -> u64 {
        self.locktime
    }

    #[inline(always)]
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    #[inline(always)]
    pub fn addresses(&self) -> &[Address] {
        &self.addresses
    }

    /// Signature slot of `address`, if it is one of the owners.
    pub fn address_index(&self, address: &Address) -> Option<u32> {
        self.addresses.binary_search(address).ok().map(|index| index as u32)
    }

    /// The owners can not be spent before `locktime`.
    #[inline]
    pub fn is_locked_at(&self, time: u64) -> bool {
        self.locktime > time
    }
}

#[derive(Deserialize, BorshDeserialize)]
#[serde(rename_all = "camelCase")]
struct OutputOwnersData {
    locktime: u64,
    threshold: u32,
    addresses: Vec<Address>,
}

impl TryFrom<OutputOwnersData> for OutputOwners {
    type Error = OwnersError;

    fn try_from(data: OutputOwnersData) -> Result<Self, Self::Error> {
        OutputOwners::try_new(data.locktime, data.threshold, data.addresses)
    }
}

// Deserialization goes through `try_new` so that decoded owners hold the same invariants.

impl<'de> Deserialize<'de> for OutputOwners {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <OutputOwnersData as Deserialize>::deserialize(deserializer)?.try_into().map_err(serde::de::Error::custom)
    }
}

impl BorshDeserialize for OutputOwners {
    fn deserialize_reader<R: std::io::Read>(reader: &mut R) -> std::io::Result<Self> {
        let data = OutputOwnersData::deserialize_reader(reader)?;
        data.try_into().map_err(|err: OwnersError| std::io::Error::new(std::io::ErrorKind::InvalidData, err.to_string()))
    }
}
