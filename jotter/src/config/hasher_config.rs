use serde::{Deserialize, Serialize};
use crate::bin_constants::{DEFAULT_ARGON2_M_COST, DEFAULT_ARGON2_OUTPUT_LEN, DEFAULT_ARGON2_P_COST, DEFAULT_ARGON2_T_COST};
use crate::hasher::ProductionHasherConfig;

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ProductionHasherConfigData {
    #[serde(default = "production_hasher_config_default_argon2_m_cost")]
    pub argon2_m_cost: u32,

    #[serde(default = "production_hasher_config_default_argon2_t_cost")]
    pub argon2_t_cost: u32,

    #[serde(default = "production_hasher_config_default_argon2_p_cost")]
    pub argon2_p_cost: u32,

    #[serde(default = "production_hasher_config_default_argon2_output_len")]
    pub argon2_output_len: Option<usize>,
}

pub fn production_hasher_config_default_argon2_m_cost() -> u32 {
    DEFAULT_ARGON2_M_COST
}

pub fn production_hasher_config_default_argon2_t_cost() -> u32 {
    DEFAULT_ARGON2_T_COST
}

pub fn production_hasher_config_default_argon2_p_cost() -> u32 {
    DEFAULT_ARGON2_P_COST
}

pub fn production_hasher_config_default_argon2_output_len() -> Option<usize> {
    DEFAULT_ARGON2_OUTPUT_LEN
}

impl TryFrom<ProductionHasherConfigData> for argon2::Params {
    type Error = argon2::Error;
    fn try_from(value: ProductionHasherConfigData) -> Result<Self, Self::Error> {
        argon2::Params::new(
            value.argon2_m_cost,
            value.argon2_t_cost,
            value.argon2_p_cost,
            value.argon2_output_len,
        )
    }
}

impl TryFrom<ProductionHasherConfigData> for ProductionHasherConfig {
    type Error = argon2::Error;
    fn try_from(value: ProductionHasherConfigData) -> Result<Self, Self::Error> {
        Ok(ProductionHasherConfig::new(value.try_into()?))
    }
}

impl Default for ProductionHasherConfigData {
    fn default() -> Self {
        ProductionHasherConfigData {
            argon2_m_cost: DEFAULT_ARGON2_M_COST,
            argon2_t_cost: DEFAULT_ARGON2_T_COST,
            argon2_p_cost: DEFAULT_ARGON2_P_COST,
            argon2_output_len: DEFAULT_ARGON2_OUTPUT_LEN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hasher_config_defaults_match() {
        assert_eq!(
            ProductionHasherConfigData::default(),
            serde_json::de::from_str("{}").unwrap(),
        )
    }

    #[test]
    fn defaults_are_valid_argon2_params() {
        let params: argon2::Params = ProductionHasherConfigData::default()
            .try_into()
            .expect("default params rejected");
        assert_eq!(params.m_cost(), DEFAULT_ARGON2_M_COST);
        assert_eq!(params.t_cost(), DEFAULT_ARGON2_T_COST);
        assert_eq!(params.p_cost(), DEFAULT_ARGON2_P_COST);
    }

    #[test]
    fn invalid_params_are_rejected() {
        let data = ProductionHasherConfigData {
            argon2_t_cost: 0,
            ..ProductionHasherConfigData::default()
        };
        assert!(argon2::Params::try_from(data).is_err());
    }
}
