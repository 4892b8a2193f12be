//! Common traits and types shared by the block-proposal stage of the miner.
//!
//! The stage itself lives in `miner-block-assembly`. This crate holds the
//! contracts it consumes (chain storage, consensus engine, transaction pools),
//! the configuration it reads and the in-progress block record it produces.

mod chain_config;
mod config;
mod gas_limit;
mod mem_store;
mod signer;
mod traits;
mod types;

pub use chain_config::{
    ChainConfig, DAO_FORK_BLOCK_EXTRA, DAO_FORK_EXTRA_RANGE, MAXIMUM_EXTRA_DATA_SIZE,
};
pub use config::{ConfigError, MiningConfig};
pub use gas_limit::{calc_gas_limit, GAS_LIMIT_BOUND_DIVISOR, MIN_GAS_LIMIT};
pub use mem_store::MemChainStore;
pub use signer::{Signer, SignerError};
#[cfg(feature = "test-utils")]
pub use traits::{
    engine::MockConsensusEngine,
    pool::{MockBestTxPool, MockLegacyTxPool},
};
pub use traits::{
    engine::{ConsensusEngine, EngineError},
    pool::{BestTxPool, LegacyTxPool, PendingBySender, PoolError, PoolResult, TxRlp},
    storage::{ChainReader, StorageError, StorageResult},
};
pub use types::{
    mining_block::{MiningBlock, MiningState},
    tx_stream::{PooledTx, TransactionsStream},
};
