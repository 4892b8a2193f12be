use std::collections::HashMap;

use alloy_consensus::TxEnvelope;
use alloy_primitives::{Address, Bytes};
use thiserror::Error;

/// An EIP-2718 encoded pool transaction with the sender the pool recovered
/// when admitting it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxRlp {
    pub rlp: Bytes,
    pub sender: Address,
}

impl TxRlp {
    pub fn new(rlp: impl Into<Bytes>, sender: Address) -> Self {
        Self {
            rlp: rlp.into(),
            sender,
        }
    }
}

/// Pending transactions grouped by the account that sent them, each group in
/// ascending nonce order.
pub type PendingBySender = HashMap<Address, Vec<TxEnvelope>>;

/// Flat pool that hands out transactions already ranked for inclusion.
///
/// Does not distinguish locally submitted transactions.
#[cfg_attr(feature = "test-utils", mockall::automock)]
pub trait BestTxPool {
    /// Returns up to `limit` of the best pending transactions, best first.
    ///
    /// The read happens under a read-only snapshot of the pool owned by the
    /// implementation; returned bytes must not borrow from it.
    fn best(&self, limit: usize) -> PoolResult<Vec<TxRlp>>;
}

/// Legacy pool keeping pending transactions per sender.
#[cfg_attr(feature = "test-utils", mockall::automock)]
pub trait LegacyTxPool {
    /// Returns all executable pending transactions grouped by sender.
    fn pending(&self) -> PoolResult<PendingBySender>;

    /// Returns the addresses the operator marked as local.
    fn locals(&self) -> Vec<Address>;
}

pub type PoolResult<T> = Result<T, PoolError>;

/// Errors raised while reading from a transaction pool.
#[derive(Debug, Error)]
pub enum PoolError {
    /// The pool snapshot could not be opened or read.
    #[error("pool snapshot: {0}")]
    Snapshot(String),

    /// The pool is shut down or otherwise not serving reads.
    #[error("pool unavailable: {0}")]
    Unavailable(String),
}

impl PoolError {
    pub fn snapshot(msg: impl Into<String>) -> Self {
        Self::Snapshot(msg.into())
    }
}
