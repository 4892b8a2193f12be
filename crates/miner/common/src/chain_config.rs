use alloy_primitives::ChainId;
use serde::{Deserialize, Serialize};

/// Number of blocks, starting at the DAO fork block, whose extra-data is
/// overridden by nodes taking a side on the fork.
pub const DAO_FORK_EXTRA_RANGE: u64 = 10;

/// Extra-data a fork-supporting node must stamp on blocks in the DAO range.
pub const DAO_FORK_BLOCK_EXTRA: &[u8] = b"dao-hard-fork";

/// Maximum size of the header extra-data field.
pub const MAXIMUM_EXTRA_DATA_SIZE: usize = 32;

/// Chain specific rules that must match every other node on the network.
///
/// Fork activations are block numbers; `None` means the fork never activates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConfig {
    /// EIP-155 chain id.
    pub chain_id: ChainId,

    #[serde(default)]
    pub homestead_block: Option<u64>,

    #[serde(default)]
    pub eip155_block: Option<u64>,

    #[serde(default)]
    pub berlin_block: Option<u64>,

    #[serde(default)]
    pub london_block: Option<u64>,

    /// Block at which the DAO hard-fork extra-data rule starts.
    #[serde(default)]
    pub dao_fork_block: Option<u64>,

    /// Whether this node sides with the DAO hard-fork.
    #[serde(default)]
    pub dao_fork_support: bool,
}

impl ChainConfig {
    /// Ethereum mainnet.
    pub fn mainnet() -> Self {
        Self {
            chain_id: 1,
            homestead_block: Some(1_150_000),
            eip155_block: Some(2_675_000),
            berlin_block: Some(12_244_000),
            london_block: Some(12_965_000),
            dao_fork_block: Some(1_920_000),
            dao_fork_support: true,
        }
    }

    /// A chain with no forks activated and a given chain id.
    pub fn frontier(chain_id: ChainId) -> Self {
        Self {
            chain_id,
            homestead_block: None,
            eip155_block: None,
            berlin_block: None,
            london_block: None,
            dao_fork_block: None,
            dao_fork_support: false,
        }
    }

    /// A chain with every supported fork active from genesis.
    pub fn all_forks(chain_id: ChainId) -> Self {
        Self {
            chain_id,
            homestead_block: Some(0),
            eip155_block: Some(0),
            berlin_block: Some(0),
            london_block: Some(0),
            dao_fork_block: None,
            dao_fork_support: false,
        }
    }

    pub fn is_homestead(&self, number: u64) -> bool {
        is_active(self.homestead_block, number)
    }

    pub fn is_eip155(&self, number: u64) -> bool {
        is_active(self.eip155_block, number)
    }

    pub fn is_berlin(&self, number: u64) -> bool {
        is_active(self.berlin_block, number)
    }

    pub fn is_london(&self, number: u64) -> bool {
        is_active(self.london_block, number)
    }

    /// Returns true if `number` lies in the DAO extra-data override window.
    pub fn is_dao_extra_range(&self, number: u64) -> bool {
        self.dao_fork_block
            .is_some_and(|fork| number >= fork && number < fork.saturating_add(DAO_FORK_EXTRA_RANGE))
    }
}

fn is_active(fork: Option<u64>, number: u64) -> bool {
    fork.is_some_and(|fork| fork <= number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mainnet_fork_activation() {
        let chain = ChainConfig::mainnet();

        assert!(!chain.is_homestead(1_149_999));
        assert!(chain.is_homestead(1_150_000));
        assert!(!chain.is_eip155(2_674_999));
        assert!(chain.is_eip155(2_675_000));
        assert!(!chain.is_london(12_964_999));
        assert!(chain.is_london(12_965_000));
    }

    #[test]
    fn test_dao_extra_range_bounds() {
        let chain = ChainConfig::mainnet();

        assert!(!chain.is_dao_extra_range(1_919_999));
        assert!(chain.is_dao_extra_range(1_920_000));
        assert!(chain.is_dao_extra_range(1_920_009));
        assert!(!chain.is_dao_extra_range(1_920_010));
    }

    #[test]
    fn test_no_dao_block_is_inert() {
        let chain = ChainConfig::frontier(1);
        assert!(!chain.is_dao_extra_range(0));
        assert!(!chain.is_dao_extra_range(1_920_000));
    }

    #[test]
    fn test_deserialize_with_missing_forks() {
        let chain: ChainConfig = toml::from_str(
            r#"
            chain_id = 1337
            london_block = 5
            "#,
        )
        .unwrap();

        assert_eq!(chain.chain_id, 1337);
        assert_eq!(chain.homestead_block, None);
        assert!(chain.is_london(5));
        assert!(!chain.dao_fork_support);
    }
}
