use super::constants::{DEFAULT_FEE_WEIGHTS, DEFAULT_MAX_GAS_CAPACITY, DEFAULT_MIN_GAS_PRICE};
use crate::{complexity::Dimensions, network::NetworkType};
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// Fee parameters of a network. Transactions built against the same params
/// and inputs are byte-identical, so every party must agree on these.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
#[serde(rename_all = "camelCase")]
pub struct Params {
    pub network: NetworkType,

    /// Per-axis price of complexity, converting [`Dimensions`] into gas
    pub weights: Dimensions,

    /// Price per unit of gas. Fee = gas * price
    pub min_gas_price: u64,

    pub max_capacity: u64,
}

impl Params {
    /// Gas of `complexity` under these weights, `None` on overflow
    #[inline]
    pub fn gas(&self, complexity: &Dimensions) -> Option<u64> {
        complexity.to_gas(&self.weights)
    }

    /// Fee of `complexity` at the minimal gas price, `None` on overflow
    pub fn fee(&self, complexity: &Dimensions) -> Option<u64> {
        self.gas(complexity)?.checked_mul(self.min_gas_price)
    }

    pub fn override_params(self, overrides: OverrideParams) -> Self {
        Self {
            network: self.network,
            weights: overrides.weights.unwrap_or(self.weights),
            min_gas_price: overrides.min_gas_price.unwrap_or(self.min_gas_price),
            max_capacity: overrides.max_capacity.unwrap_or(self.max_capacity),
        }
    }
}

/// Partial params, typically loaded from a config file and applied on top of
/// a preset with [`Params::override_params`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OverrideParams {
    pub weights: Option<Dimensions>,
    pub min_gas_price: Option<u64>,
    pub max_capacity: Option<u64>,
}

impl From<Params> for OverrideParams {
    fn from(p: Params) -> Self {
        Self { weights: Some(p.weights), min_gas_price: Some(p.min_gas_price), max_capacity: Some(p.max_capacity) }
    }
}

impl From<NetworkType> for Params {
    fn from(value: NetworkType) -> Self {
        match value {
            NetworkType::Mainnet => MAINNET_PARAMS,
            NetworkType::Testnet => TESTNET_PARAMS,
            NetworkType::Devnet => DEVNET_PARAMS,
            NetworkType::Local => LOCAL_PARAMS,
        }
    }
}

pub const MAINNET_PARAMS: Params = Params {
    network: NetworkType::Mainnet,
    weights: DEFAULT_FEE_WEIGHTS,
    min_gas_price: DEFAULT_MIN_GAS_PRICE,
    max_capacity: DEFAULT_MAX_GAS_CAPACITY,
};

pub const TESTNET_PARAMS: Params = Params { network: NetworkType::Testnet, ..MAINNET_PARAMS };

pub const DEVNET_PARAMS: Params = Params { network: NetworkType::Devnet, ..MAINNET_PARAMS };

pub const LOCAL_PARAMS: Params = Params { network: NetworkType::Local, ..MAINNET_PARAMS };

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        for network in NetworkType::iter() {
            let params = Params::from(network);
            assert_eq!(params.network, network);
            assert_eq!(params.weights, Dimensions::new(1, 1000, 1000, 4));
            assert_eq!(params.min_gas_price, 1);
        }
        let complexity = Dimensions::new(300, 1, 2, 200);
        assert_eq!(MAINNET_PARAMS.gas(&complexity), Some(300 + 1000 + 2000 + 800));
        assert_eq!(MAINNET_PARAMS.fee(&complexity), Some(4100));
    }

    #[test]
    fn test_toml_overrides() {
        let overrides: OverrideParams = toml::from_str(
            r#"
            minGasPrice = 25

            [weights]
            bandwidth = 2
            dbRead = 500
            dbWrite = 500
            compute = 8
            "#,
        )
        .unwrap();
        assert_eq!(overrides.max_capacity, None);

        let params = TESTNET_PARAMS.override_params(overrides);
        assert_eq!(params.network, NetworkType::Testnet);
        assert_eq!(params.weights, Dimensions::new(2, 500, 500, 8));
        assert_eq!(params.min_gas_price, 25);
        assert_eq!(params.max_capacity, TESTNET_PARAMS.max_capacity);

        // A full override reproduces the source params
        assert_eq!(LOCAL_PARAMS.override_params(MAINNET_PARAMS.into()), Params { network: NetworkType::Local, ..MAINNET_PARAMS });
    }
}
