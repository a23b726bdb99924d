pub mod constants;
pub mod params;

use crate::complexity::Dimensions;
use params::{OverrideParams, Params};

/// Builds [`Params`] from a preset with targeted edits.
pub struct ParamsBuilder {
    params: Params,
}

impl ParamsBuilder {
    pub fn new(params: Params) -> Self {
        Self { params }
    }

    pub fn edit_params<F>(mut self, edit_func: F) -> Self
    where
        F: Fn(&mut Params),
    {
        edit_func(&mut self.params);
        self
    }

    pub fn apply_overrides(mut self, overrides: OverrideParams) -> Self {
        self.params = self.params.override_params(overrides);
        self
    }

    pub fn with_gas_price(mut self, gas_price: u64) -> Self {
        self.params.min_gas_price = gas_price;
        self
    }

    pub fn with_weights(mut self, weights: Dimensions) -> Self {
        self.params.weights = weights;
        self
    }

    pub fn build(self) -> Params {
        self.params
    }
}

impl From<Params> for ParamsBuilder {
    fn from(params: Params) -> Self {
        Self::new(params)
    }
}

#[cfg(test)]
mod tests {
    use super::{params::DEVNET_PARAMS, *};

    #[test]
    fn test_builder() {
        let params = ParamsBuilder::new(DEVNET_PARAMS)
            .with_gas_price(3)
            .with_weights(Dimensions::new(1, 2, 3, 4))
            .edit_params(|p| p.max_capacity = 10)
            .apply_overrides(OverrideParams { min_gas_price: Some(7), ..Default::default() })
            .build();
        assert_eq!(params.min_gas_price, 7);
        assert_eq!(params.weights, Dimensions::new(1, 2, 3, 4));
        assert_eq!(params.max_capacity, 10);
        assert_eq!(params.network, DEVNET_PARAMS.network);
    }
}
