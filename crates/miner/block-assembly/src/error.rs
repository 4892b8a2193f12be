//! Error types for block proposal assembly.

use alloy_eips::eip2718::Eip2718Error;
use miner_common::{ConfigError, EngineError, PoolError, StorageError};

/// Errors that abort the current mining attempt.
///
/// None of these are retried here; the mining loop decides whether to try
/// again.
#[derive(Debug, thiserror::Error)]
pub enum MiningError {
    /// No reward address configured.
    #[error("refusing to mine without etherbase")]
    ZeroCoinbase,

    /// Mining configuration would produce invalid blocks.
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    /// The last executed block has no stored header.
    #[error("parent block {number} not found")]
    ParentNotFound { number: u64 },

    /// Chain storage read failed.
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    /// Transaction pool read failed.
    #[error("pool: {0}")]
    Pool(#[from] PoolError),

    /// A pending transaction handed out by the pool is malformed.
    #[error("decode pending tx at {index}: {source}")]
    TxDecode {
        index: usize,
        #[source]
        source: Eip2718Error,
    },

    /// The consensus engine refused to prepare the header.
    #[error("prepare header {number}: {source}")]
    Prepare {
        number: u64,
        #[source]
        source: EngineError,
    },
}

/// Result type for block assembly operations.
pub type MiningResult<T> = Result<T, MiningError>;
