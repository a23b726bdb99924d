//!
//! Complexity (fee) estimation.
//!
//! Every estimator returns the marginal [`Dimensions`] an item adds to a
//! transaction. The fixed envelope of a transaction kind is supplied by the
//! caller as its initial complexity, see [`base_tx_complexity`].
//!

mod dimensions;

pub use dimensions::*;

use crate::{
    codec::{ID_LEN, INT_LEN, LONG_LEN, SHORT_ID_LEN, SHORT_LEN, SIGNATURE_LEN},
    tx::{Input, Output, OutputOwners, TransactionInput, TransactionOutput},
};

pub const INTRINSIC_OUTPUT_BANDWIDTH: u64 = (
    ID_LEN      // asset id
    + INT_LEN   // output type id
) as u64;

pub const INTRINSIC_OWNERS_BANDWIDTH: u64 = (
    LONG_LEN    // locktime
    + INT_LEN   // threshold
    + INT_LEN   // number of addresses
) as u64;

pub const INTRINSIC_TRANSFER_OUTPUT_BANDWIDTH: u64 = LONG_LEN as u64 // amount
    + INTRINSIC_OWNERS_BANDWIDTH;

pub const INTRINSIC_STAKEABLE_LOCKED_OUTPUT_BANDWIDTH: u64 = (
    LONG_LEN    // locktime
    + INT_LEN   // inner output type id
) as u64;

pub const INTRINSIC_INPUT_BANDWIDTH: u64 = (
    ID_LEN      // source tx id
    + INT_LEN   // output index
    + ID_LEN    // asset id
    + INT_LEN   // input type id
    + INT_LEN   // credential type id
) as u64;

pub const INTRINSIC_TRANSFER_INPUT_BANDWIDTH: u64 = (
    LONG_LEN    // amount
    + INT_LEN   // number of signature indices
    + INT_LEN   // number of signatures
) as u64;

pub const INTRINSIC_STAKEABLE_LOCKED_INPUT_BANDWIDTH: u64 = (
    LONG_LEN    // locktime
    + INT_LEN   // inner input type id
) as u64;

pub const INTRINSIC_SIGNATURE_BANDWIDTH: u64 = (
    INT_LEN         // address index
    + SIGNATURE_LEN // signature
) as u64;

pub const INTRINSIC_ADDRESS_BANDWIDTH: u64 = SHORT_ID_LEN as u64;

pub const INTRINSIC_INPUT_DB_READ: u64 = 1;
pub const INTRINSIC_INPUT_DB_WRITE: u64 = 1;
pub const INTRINSIC_OUTPUT_DB_WRITE: u64 = 1;

pub const INTRINSIC_SIGNATURE_COMPUTE: u64 = 200;

/// Authorization of a subnet-style operation: auth type id and index count.
pub const INTRINSIC_AUTH_BANDWIDTH: u64 = (INT_LEN + INT_LEN) as u64;

pub const INTRINSIC_CREDENTIAL_BANDWIDTH: u64 = (
    INT_LEN     // credential type id
    + INT_LEN   // number of signatures
) as u64;

pub const INTRINSIC_BASE_TX_BANDWIDTH: u64 = (
    SHORT_LEN   // codec version
    + INT_LEN   // tx type id
    + INT_LEN   // network id
    + ID_LEN    // blockchain id
    + INT_LEN   // number of outputs
    + INT_LEN   // number of inputs
    + INT_LEN   // memo length
    + INT_LEN   // number of credentials
) as u64;

/// Fixed envelope of a plain base transaction.
pub const fn base_tx_complexity() -> Dimensions {
    Dimensions::from_bandwidth(INTRINSIC_BASE_TX_BANDWIDTH)
}

pub fn memo_complexity(memo: &[u8]) -> Dimensions {
    Dimensions::from_bandwidth(memo.len() as u64)
}

/// Owners as a standalone field (e.g. reward owners), including their type id.
pub fn owner_complexity(owners: &OutputOwners) -> Dimensions {
    Dimensions::from_bandwidth(
        INT_LEN as u64 + INTRINSIC_OWNERS_BANDWIDTH + owners.addresses().len() as u64 * INTRINSIC_ADDRESS_BANDWIDTH,
    )
}

pub fn output_complexity(output: &TransactionOutput) -> Dimensions {
    let mut bandwidth = INTRINSIC_OUTPUT_BANDWIDTH + INTRINSIC_TRANSFER_OUTPUT_BANDWIDTH;
    if let Output::StakeableLock(_) = output.output {
        bandwidth += INTRINSIC_STAKEABLE_LOCKED_OUTPUT_BANDWIDTH;
    }
    let addresses = output.owners().map(|owners| owners.addresses().len()).unwrap_or_default() as u64;
    bandwidth += addresses * INTRINSIC_ADDRESS_BANDWIDTH;

    Dimensions::new(bandwidth, 0, INTRINSIC_OUTPUT_DB_WRITE, 0)
}

/// Combined complexity of `outputs`, `None` on overflow.
pub fn outputs_complexity<'a>(outputs: impl IntoIterator<Item = &'a TransactionOutput>) -> Option<Dimensions> {
    Dimensions::checked_sum(outputs.into_iter().map(output_complexity))
}

/// Complexity of an input together with its credential. Each signature slot
/// pays for its index, its signature and its verification.
pub fn input_complexity(input: &TransactionInput) -> Dimensions {
    let signatures = input.sig_indices().len() as u64;
    let mut bandwidth = INTRINSIC_INPUT_BANDWIDTH + INTRINSIC_TRANSFER_INPUT_BANDWIDTH;
    if let Input::StakeableLock(_) = input.input {
        bandwidth += INTRINSIC_STAKEABLE_LOCKED_INPUT_BANDWIDTH;
    }
    bandwidth += signatures * INTRINSIC_SIGNATURE_BANDWIDTH;

    Dimensions::new(bandwidth, INTRINSIC_INPUT_DB_READ, INTRINSIC_INPUT_DB_WRITE, signatures * INTRINSIC_SIGNATURE_COMPUTE)
}

pub fn inputs_complexity<'a>(inputs: impl IntoIterator<Item = &'a TransactionInput>) -> Option<Dimensions> {
    Dimensions::checked_sum(inputs.into_iter().map(input_complexity))
}

/// A standalone signature set: credential envelope plus one signature per slot.
pub fn credential_complexity(signatures: usize) -> Dimensions {
    let signatures = signatures as u64;
    Dimensions::new(
        INTRINSIC_CREDENTIAL_BANDWIDTH + signatures * SIGNATURE_LEN as u64,
        0,
        0,
        signatures * INTRINSIC_SIGNATURE_COMPUTE,
    )
}

/// An authorization given as signature indices (with the credential that
/// satisfies it).
pub fn auth_complexity(sig_indices: &[u32]) -> Dimensions {
    let signatures = sig_indices.len() as u64;
    Dimensions::new(
        INTRINSIC_AUTH_BANDWIDTH + INTRINSIC_CREDENTIAL_BANDWIDTH + signatures * INTRINSIC_SIGNATURE_BANDWIDTH,
        0,
        0,
        signatures * INTRINSIC_SIGNATURE_COMPUTE,
    )
}
