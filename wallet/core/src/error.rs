//!
//! Errors produced by the spend engine.
//!

use spendkit_consensus_core::tx::{AssetId, OwnersError};
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// What an asset amount was required for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Purpose {
    Burn,
    Stake,
    Fee,
}

impl Display for Purpose {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Purpose::Burn => "burn",
            Purpose::Stake => "stake",
            Purpose::Fee => "fee",
        };
        f.write_str(s)
    }
}

/// UTXO selection stage of the spend pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpendStage {
    Locked,
    Unlocked,
}

impl Display for SpendStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SpendStage::Locked => f.write_str("locked"),
            SpendStage::Unlocked => f.write_str("unlocked"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("insufficient funds: {shortfall} more of asset {asset_id} is needed for {purpose}")]
    InsufficientFunds { asset_id: AssetId, purpose: Purpose, shortfall: u64 },

    #[error("none of the {candidates} candidate UTXOs of the {stage} stage can be signed by the controlled addresses")]
    NoSignableUtxo { stage: SpendStage, candidates: usize },

    #[error("structural integrity violation: {0}")]
    StructuralIntegrity(String),

    #[error(transparent)]
    Owners(#[from] OwnersError),

    #[error("{0}")]
    Custom(String),
}

impl Error {
    pub fn custom<T: Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    pub fn structural<T: Display>(msg: T) -> Self {
        Error::StructuralIntegrity(msg.to_string())
    }

    pub(crate) fn overflow(what: &str) -> Self {
        Error::StructuralIntegrity(format!("{what} overflows"))
    }

    /// The caller could retry with more funds.
    pub fn is_insufficient_funds(&self) -> bool {
        matches!(self, Error::InsufficientFunds { .. })
    }

    /// The supplied data is malformed, retrying with the same data can not succeed.
    pub fn is_structural(&self) -> bool {
        matches!(self, Error::StructuralIntegrity(_) | Error::Owners(_))
    }
}

impl From<String> for Error {
    fn from(err: String) -> Self {
        Self::Custom(err)
    }
}

impl From<&str> for Error {
    fn from(err: &str) -> Self {
        Self::Custom(err.to_string())
    }
}
