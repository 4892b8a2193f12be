use alloy_consensus::{Header, ReceiptEnvelope, TxEnvelope};

use crate::TransactionsStream;

/// Working state of the block currently being mined.
///
/// The header and uncles are final once the create-block stage returns. The
/// transaction streams are handed to the execution stage, which fills `txs`
/// and `receipts`.
#[derive(Debug)]
pub struct MiningBlock {
    pub header: Header,
    pub uncles: Vec<Header>,
    pub txs: Vec<TxEnvelope>,
    pub receipts: Vec<ReceiptEnvelope>,

    /// Transactions from operator-local senders, tried first.
    pub local_txs: Box<dyn TransactionsStream>,
    /// Everything else.
    pub remote_txs: Box<dyn TransactionsStream>,
}

impl MiningBlock {
    pub fn new(
        header: Header,
        uncles: Vec<Header>,
        local_txs: Box<dyn TransactionsStream>,
        remote_txs: Box<dyn TransactionsStream>,
    ) -> Self {
        Self {
            header,
            uncles,
            txs: Vec::new(),
            receipts: Vec::new(),
            local_txs,
            remote_txs,
        }
    }

    pub fn number(&self) -> u64 {
        self.header.number
    }
}

/// Holder of the in-progress block across mining attempts.
///
/// Each attempt replaces the record wholesale; a failed attempt leaves no
/// record behind.
#[derive(Debug, Default)]
pub struct MiningState {
    current: Option<MiningBlock>,
}

impl MiningState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&MiningBlock> {
        self.current.as_ref()
    }

    pub fn current_mut(&mut self) -> Option<&mut MiningBlock> {
        self.current.as_mut()
    }

    /// Installs the record of a new attempt, dropping the previous one.
    pub fn replace(&mut self, block: MiningBlock) {
        self.current = Some(block);
    }

    /// Discards the current record.
    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Takes the current record out, leaving none.
    pub fn take(&mut self) -> Option<MiningBlock> {
        self.current.take()
    }
}
