use super::{Amount, AssetId, OutputOwners};
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// A plain secp256k1 transfer output.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferOutput {
    pub amount: Amount,
    pub owners: OutputOwners,
}

impl TransferOutput {
    pub fn new(amount: Amount, owners: OutputOwners) -> Self {
        Self { amount, owners }
    }
}

/// A transfer output committed to staking until `locktime`. The wrapped
/// output is always a [`TransferOutput`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
#[serde(rename_all = "camelCase")]
pub struct StakeableLockOutput {
    pub locktime: u64,
    pub transfer_output: TransferOutput,
}

impl StakeableLockOutput {
    pub fn new(locktime: u64, transfer_output: TransferOutput) -> Self {
        Self { locktime, transfer_output }
    }

    /// Still locked at `time`, i.e. the value can only be staked.
    #[inline]
    pub fn is_locked_at(&self, time: u64) -> bool {
        self.locktime > time
    }
}

/// Closed set of output kinds. `Unsupported` carries the codec type id of an
/// output this library does not know how to spend; such outputs are never
/// selected.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum Output {
    Transfer(TransferOutput),
    StakeableLock(StakeableLockOutput),
    Unsupported { type_id: u32 },
}

impl Output {
    /// The spendable transfer output, looking through a stakeable lock.
    pub fn transfer_output(&self) -> Option<&TransferOutput> {
        match self {
            Output::Transfer(out) => Some(out),
            Output::StakeableLock(out) => Some(&out.transfer_output),
            Output::Unsupported { .. } => None,
        }
    }

    pub fn amount(&self) -> Option<Amount> {
        self.transfer_output().map(|out| out.amount)
    }

    pub fn owners(&self) -> Option<&OutputOwners> {
        self.transfer_output().map(|out| &out.owners)
    }

    pub fn stakeable_locktime(&self) -> Option<u64> {
        match self {
            Output::StakeableLock(out) => Some(out.locktime),
            _ => None,
        }
    }

    pub fn is_transfer(&self) -> bool {
        matches!(self, Output::Transfer(_))
    }

    pub fn is_stakeable_lock(&self) -> bool {
        matches!(self, Output::StakeableLock(_))
    }

    pub(crate) fn transfer_output_mut(&mut self) -> Option<&mut TransferOutput> {
        match self {
            Output::Transfer(out) => Some(out),
            Output::StakeableLock(out) => Some(&mut out.transfer_output),
            Output::Unsupported { .. } => None,
        }
    }
}

impl From<TransferOutput> for Output {
    fn from(out: TransferOutput) -> Self {
        Output::Transfer(out)
    }
}

impl From<StakeableLockOutput> for Output {
    fn from(out: StakeableLockOutput) -> Self {
        Output::StakeableLock(out)
    }
}

/// An output together with the asset it carries.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionOutput {
    pub asset_id: AssetId,
    pub output: Output,
}

impl TransactionOutput {
    pub fn new(asset_id: AssetId, output: Output) -> Self {
        Self { asset_id, output }
    }

    pub fn transfer(asset_id: AssetId, amount: Amount, owners: OutputOwners) -> Self {
        Self { asset_id, output: TransferOutput::new(amount, owners).into() }
    }

    pub fn stakeable_lock(asset_id: AssetId, locktime: u64, amount: Amount, owners: OutputOwners) -> Self {
        Self { asset_id, output: StakeableLockOutput::new(locktime, TransferOutput::new(amount, owners)).into() }
    }

    /// Amount carried by the output; unsupported outputs carry nothing spendable.
    pub fn amount(&self) -> Amount {
        self.output.amount().unwrap_or_default()
    }

    pub fn owners(&self) -> Option<&OutputOwners> {
        self.output.owners()
    }

    /// Mutable access to the amount of a transfer or stakeable output.
    pub fn amount_mut(&mut self) -> Option<&mut Amount> {
        self.output.transfer_output_mut().map(|out| &mut out.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tx::Address;

    #[test]
    fn test_output_accessors() {
        let owners = OutputOwners::single(Address::new([1; 20]));
        let locked = TransactionOutput::stakeable_lock(1.into(), 50, 1_000, owners.clone());
        assert_eq!(locked.amount(), 1_000);
        assert_eq!(locked.output.stakeable_locktime(), Some(50));
        assert_eq!(locked.owners(), Some(&owners));
        assert!(locked.output.is_stakeable_lock());

        let mut plain = TransactionOutput::transfer(1.into(), 7, owners);
        assert!(plain.output.is_transfer());
        assert_eq!(plain.output.stakeable_locktime(), None);
        *plain.amount_mut().unwrap() += 3;
        assert_eq!(plain.amount(), 10);

        let mut other = TransactionOutput::new(1.into(), Output::Unsupported { type_id: 99 });
        assert_eq!(other.amount(), 0);
        assert!(other.owners().is_none());
        assert!(other.amount_mut().is_none());
    }
}
