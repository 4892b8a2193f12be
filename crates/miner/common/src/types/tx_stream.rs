use std::fmt::Debug;

use alloy_consensus::{transaction::Recovered, TxEnvelope};

/// A pool transaction paired with its sender.
pub type PooledTx = Recovered<TxEnvelope>;

/// Ordered, single-pass source of transactions for the execution stage.
///
/// A stream is consumed at most once; it cannot be rewound.
pub trait TransactionsStream: Debug + Send {
    /// Returns the next transaction without consuming it.
    fn peek(&self) -> Option<&PooledTx>;

    /// Consumes the head. Orderings with per-sender queues make the sender's
    /// next transaction eligible.
    fn shift(&mut self);

    /// Consumes the head and, for orderings with per-sender queues, every
    /// remaining transaction of the same sender. Used when the head failed
    /// and its successors can no longer execute.
    fn pop(&mut self);

    fn is_empty(&self) -> bool {
        self.peek().is_none()
    }

    /// Returns the head and shifts past it.
    fn next_tx(&mut self) -> Option<PooledTx> {
        let tx = self.peek().cloned()?;
        self.shift();
        Some(tx)
    }
}
