use alloy_primitives::{Address, Bytes};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::MAXIMUM_EXTRA_DATA_SIZE;

/// Default lower gas limit target.
const DEFAULT_GAS_FLOOR: u64 = 8_000_000;

/// Default upper gas limit target.
const DEFAULT_GAS_CEIL: u64 = 8_000_000;

/// Operator configuration for block production.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MiningConfig {
    /// Address block rewards are paid to. Mining refuses to start while this
    /// is the zero address.
    #[serde(default)]
    etherbase: Address,

    /// Extra-data stamped into every produced header.
    #[serde(default)]
    extra_data: Bytes,

    /// Gas limit the miner steers towards when the parent is below it.
    #[serde(default = "default_gas_floor")]
    gas_floor: u64,

    /// Gas limit the miner steers towards when the parent is above it.
    #[serde(default = "default_gas_ceil")]
    gas_ceil: u64,
}

fn default_gas_floor() -> u64 {
    DEFAULT_GAS_FLOOR
}

fn default_gas_ceil() -> u64 {
    DEFAULT_GAS_CEIL
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            etherbase: Address::ZERO,
            extra_data: Bytes::new(),
            gas_floor: DEFAULT_GAS_FLOOR,
            gas_ceil: DEFAULT_GAS_CEIL,
        }
    }
}

impl MiningConfig {
    pub fn with_etherbase(mut self, etherbase: Address) -> Self {
        self.etherbase = etherbase;
        self
    }

    pub fn with_extra_data(mut self, extra_data: impl Into<Bytes>) -> Self {
        self.extra_data = extra_data.into();
        self
    }

    pub fn with_gas_floor(mut self, gas_floor: u64) -> Self {
        self.gas_floor = gas_floor;
        self
    }

    pub fn with_gas_ceil(mut self, gas_ceil: u64) -> Self {
        self.gas_ceil = gas_ceil;
        self
    }

    pub fn etherbase(&self) -> Address {
        self.etherbase
    }

    pub fn extra_data(&self) -> &Bytes {
        &self.extra_data
    }

    pub fn gas_floor(&self) -> u64 {
        self.gas_floor
    }

    pub fn gas_ceil(&self) -> u64 {
        self.gas_ceil
    }

    /// Checks the values that would otherwise produce blocks the network
    /// rejects.
    ///
    /// A zero etherbase is not checked here; it is reported by the stage so
    /// configuration can be loaded before the reward address is known.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.extra_data.len() > MAXIMUM_EXTRA_DATA_SIZE {
            return Err(ConfigError::ExtraDataTooLong {
                len: self.extra_data.len(),
                max: MAXIMUM_EXTRA_DATA_SIZE,
            });
        }
        if self.gas_floor > self.gas_ceil {
            return Err(ConfigError::GasFloorAboveCeil {
                floor: self.gas_floor,
                ceil: self.gas_ceil,
            });
        }
        Ok(())
    }
}

/// Invalid mining configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("extra-data too long: {len} bytes (max {max})")]
    ExtraDataTooLong { len: usize, max: usize },

    #[error("gas floor {floor} above gas ceil {ceil}")]
    GasFloorAboveCeil { floor: u64, ceil: u64 },
}

#[cfg(test)]
mod tests {
    use alloy_primitives::address;

    use super::*;

    #[test]
    fn test_defaults_from_empty_toml() {
        let config: MiningConfig = toml::from_str("").unwrap();

        assert_eq!(config, MiningConfig::default());
        assert_eq!(config.etherbase(), Address::ZERO);
        assert_eq!(config.gas_floor(), DEFAULT_GAS_FLOOR);
        assert_eq!(config.gas_ceil(), DEFAULT_GAS_CEIL);
    }

    #[test]
    fn test_deserialize_hex_fields() {
        let config: MiningConfig = toml::from_str(
            r#"
            etherbase = "0x00000000000000000000000000000000000000aa"
            extra_data = "0x6d696e6572"
            gas_ceil = 30000000
            "#,
        )
        .unwrap();

        assert_eq!(
            config.etherbase(),
            address!("00000000000000000000000000000000000000aa")
        );
        assert_eq!(config.extra_data().as_ref(), b"miner");
        assert_eq!(config.gas_floor(), DEFAULT_GAS_FLOOR);
        assert_eq!(config.gas_ceil(), 30_000_000);
    }

    #[test]
    fn test_validate_extra_data_limit() {
        let ok = MiningConfig::default().with_extra_data(vec![0u8; MAXIMUM_EXTRA_DATA_SIZE]);
        assert_eq!(ok.validate(), Ok(()));

        let too_long =
            MiningConfig::default().with_extra_data(vec![0u8; MAXIMUM_EXTRA_DATA_SIZE + 1]);
        assert_eq!(
            too_long.validate(),
            Err(ConfigError::ExtraDataTooLong {
                len: MAXIMUM_EXTRA_DATA_SIZE + 1,
                max: MAXIMUM_EXTRA_DATA_SIZE,
            })
        );
    }

    #[test]
    fn test_validate_gas_bounds() {
        let config = MiningConfig::default()
            .with_gas_floor(10)
            .with_gas_ceil(5);

        assert!(matches!(
            config.validate(),
            Err(ConfigError::GasFloorAboveCeil { floor: 10, ceil: 5 })
        ));
    }
}
