//!
//! Canonical big-endian encoding of the transaction model.
//!
//! Only the encoder is provided. The bytes define the canonical ordering of
//! outputs and their lengths back the complexity constants in [`crate::complexity`].
//!

use crate::tx::{
    Credential, Input, Output, OutputOwners, StakeableLockInput, StakeableLockOutput, TransactionInput, TransactionOutpoint,
    TransactionOutput, TransferInput, TransferOutput, UtxoEntry,
};
use spendkit_addresses::ADDRESS_SIZE;
use spendkit_hashes::HASH_SIZE;

pub const ID_LEN: usize = HASH_SIZE;
pub const SHORT_ID_LEN: usize = ADDRESS_SIZE;
pub const SHORT_LEN: usize = 2;
pub const INT_LEN: usize = 4;
pub const LONG_LEN: usize = 8;
pub const SIGNATURE_LEN: usize = crate::tx::SIGNATURE_SIZE;

pub mod type_ids {
    pub const TRANSFER_INPUT: u32 = 5;
    pub const TRANSFER_OUTPUT: u32 = 7;
    pub const SECP256K1_CREDENTIAL: u32 = 9;
    pub const OUTPUT_OWNERS: u32 = 11;
    pub const STAKEABLE_LOCK_INPUT: u32 = 21;
    pub const STAKEABLE_LOCK_OUTPUT: u32 = 22;
}

pub trait Encode {
    fn encoded_len(&self) -> usize;

    fn encode_into(&self, buf: &mut Vec<u8>);

    fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        self.encode_into(&mut buf);
        buf
    }
}

#[inline]
fn put_u32(buf: &mut Vec<u8>, v: u32) {
    buf.extend_from_slice(&v.to_be_bytes());
}

#[inline]
fn put_u64(buf: &mut Vec<u8>, v: u64) {
    buf.extend_from_slice(&v.to_be_bytes());
}

#[inline]
fn put_len(buf: &mut Vec<u8>, len: usize) {
    // Collections are bounded far below u32::MAX by any transaction size limit
    put_u32(buf, len as u32);
}

/// Owners embedded in an output body are written without their type id.
fn owners_body_len(owners: &OutputOwners) -> usize {
    LONG_LEN + INT_LEN + INT_LEN + owners.addresses().len() * SHORT_ID_LEN
}

fn encode_owners_body(owners: &OutputOwners, buf: &mut Vec<u8>) {
    put_u64(buf, owners.locktime());
    put_u32(buf, owners.threshold());
    put_len(buf, owners.addresses().len());
    for address in owners.addresses() {
        buf.extend_from_slice(address.as_bytes());
    }
}

impl Encode for OutputOwners {
    fn encoded_len(&self) -> usize {
        INT_LEN + owners_body_len(self)
    }

    fn encode_into(&self, buf: &mut Vec<u8>) {
        put_u32(buf, type_ids::OUTPUT_OWNERS);
        encode_owners_body(self, buf);
    }
}

impl TransferOutput {
    fn body_len(&self) -> usize {
        LONG_LEN + owners_body_len(&self.owners)
    }

    fn encode_body(&self, buf: &mut Vec<u8>) {
        put_u64(buf, self.amount);
        encode_owners_body(&self.owners, buf);
    }
}

impl StakeableLockOutput {
    fn body_len(&self) -> usize {
        LONG_LEN + INT_LEN + self.transfer_output.body_len()
    }

    fn encode_body(&self, buf: &mut Vec<u8>) {
        put_u64(buf, self.locktime);
        put_u32(buf, type_ids::TRANSFER_OUTPUT);
        self.transfer_output.encode_body(buf);
    }
}

impl Encode for Output {
    fn encoded_len(&self) -> usize {
        INT_LEN
            + match self {
                Output::Transfer(out) => out.body_len(),
                Output::StakeableLock(out) => out.body_len(),
                Output::Unsupported { .. } => 0,
            }
    }

    fn encode_into(&self, buf: &mut Vec<u8>) {
        match self {
            Output::Transfer(out) => {
                put_u32(buf, type_ids::TRANSFER_OUTPUT);
                out.encode_body(buf);
            }
            Output::StakeableLock(out) => {
                put_u32(buf, type_ids::STAKEABLE_LOCK_OUTPUT);
                out.encode_body(buf);
            }
            Output::Unsupported { type_id } => put_u32(buf, *type_id),
        }
    }
}

impl Encode for TransactionOutput {
    fn encoded_len(&self) -> usize {
        ID_LEN + self.output.encoded_len()
    }

    fn encode_into(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(self.asset_id.as_bytes());
        self.output.encode_into(buf);
    }
}

impl Encode for TransactionOutpoint {
    fn encoded_len(&self) -> usize {
        ID_LEN + INT_LEN
    }

    fn encode_into(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(self.transaction_id.as_bytes());
        put_u32(buf, self.index);
    }
}

impl Encode for UtxoEntry {
    fn encoded_len(&self) -> usize {
        self.outpoint.encoded_len() + ID_LEN + self.output.encoded_len()
    }

    fn encode_into(&self, buf: &mut Vec<u8>) {
        self.outpoint.encode_into(buf);
        buf.extend_from_slice(self.asset_id.as_bytes());
        self.output.encode_into(buf);
    }
}

impl TransferInput {
    fn body_len(&self) -> usize {
        LONG_LEN + INT_LEN + self.sig_indices.len() * INT_LEN
    }

    fn encode_body(&self, buf: &mut Vec<u8>) {
        put_u64(buf, self.amount);
        put_len(buf, self.sig_indices.len());
        for index in self.sig_indices.iter().copied() {
            put_u32(buf, index);
        }
    }
}

impl StakeableLockInput {
    fn body_len(&self) -> usize {
        LONG_LEN + INT_LEN + self.transfer_input.body_len()
    }

    fn encode_body(&self, buf: &mut Vec<u8>) {
        put_u64(buf, self.locktime);
        put_u32(buf, type_ids::TRANSFER_INPUT);
        self.transfer_input.encode_body(buf);
    }
}

impl Encode for Input {
    fn encoded_len(&self) -> usize {
        INT_LEN
            + match self {
                Input::Transfer(input) => input.body_len(),
                Input::StakeableLock(input) => input.body_len(),
            }
    }

    fn encode_into(&self, buf: &mut Vec<u8>) {
        match self {
            Input::Transfer(input) => {
                put_u32(buf, type_ids::TRANSFER_INPUT);
                input.encode_body(buf);
            }
            Input::StakeableLock(input) => {
                put_u32(buf, type_ids::STAKEABLE_LOCK_INPUT);
                input.encode_body(buf);
            }
        }
    }
}

impl Encode for TransactionInput {
    fn encoded_len(&self) -> usize {
        self.outpoint.encoded_len() + ID_LEN + self.input.encoded_len()
    }

    fn encode_into(&self, buf: &mut Vec<u8>) {
        self.outpoint.encode_into(buf);
        buf.extend_from_slice(self.asset_id.as_bytes());
        self.input.encode_into(buf);
    }
}

impl Encode for Credential {
    fn encoded_len(&self) -> usize {
        INT_LEN + INT_LEN + self.signatures.len() * SIGNATURE_LEN
    }

    fn encode_into(&self, buf: &mut Vec<u8>) {
        put_u32(buf, type_ids::SECP256K1_CREDENTIAL);
        put_len(buf, self.signatures.len());
        for signature in self.signatures.iter() {
            buf.extend_from_slice(signature.as_bytes());
        }
    }
}
