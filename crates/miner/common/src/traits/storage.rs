use alloy_consensus::{Block, Header, TxEnvelope};
use alloy_primitives::B256;
use thiserror::Error;

/// Read access to chain storage.
///
/// One implementor value is expected to be a consistent snapshot (a single
/// read transaction): every call made through it during one block
/// construction observes the same chain.
pub trait ChainReader {
    /// Returns the canonical header at `number`.
    fn header_by_number(&self, number: u64) -> StorageResult<Option<Header>>;

    /// Returns the number of the stored header with the given hash.
    fn header_number(&self, hash: &B256) -> StorageResult<Option<u64>>;

    /// Returns the full block with the given hash and number, canonical or
    /// not.
    fn block(&self, hash: &B256, number: u64) -> StorageResult<Option<Block<TxEnvelope>>>;

    /// Returns every header stored at `number`, canonical and non-canonical.
    fn headers_by_number(&self, number: u64) -> StorageResult<Vec<Header>>;

    /// Returns the number of the last block the execution stage processed.
    fn last_executed_block(&self) -> StorageResult<u64>;
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Errors raised by chain storage reads.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(String),

    /// Stored data could not be decoded or is inconsistent.
    #[error("corrupted data: {0}")]
    Corrupted(String),
}

impl StorageError {
    /// Creates a database error.
    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    /// Creates a corrupted data error.
    pub fn corrupted(msg: impl Into<String>) -> Self {
        Self::Corrupted(msg.into())
    }
}
