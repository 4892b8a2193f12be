//! Transaction stream orderings handed to the execution stage.

use std::{
    cmp::Ordering,
    collections::{BinaryHeap, HashMap, VecDeque},
};

use alloy_consensus::{transaction::Recovered, Transaction, TxEnvelope};
use alloy_primitives::Address;
use miner_common::{PooledTx, TransactionsStream};

/// Yields transactions in the order they were given.
///
/// There are no per-sender queues, so [`TransactionsStream::pop`] drops only
/// the head.
#[derive(Debug, Clone, Default)]
pub struct TransactionsFixedOrder {
    txs: VecDeque<PooledTx>,
}

impl TransactionsFixedOrder {
    pub fn new(txs: Vec<PooledTx>) -> Self {
        Self { txs: txs.into() }
    }

    pub fn len(&self) -> usize {
        self.txs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.txs.is_empty()
    }
}

impl TransactionsStream for TransactionsFixedOrder {
    fn peek(&self) -> Option<&PooledTx> {
        self.txs.front()
    }

    fn shift(&mut self) {
        self.txs.pop_front();
    }

    fn pop(&mut self) {
        self.txs.pop_front();
    }
}

impl Iterator for TransactionsFixedOrder {
    type Item = PooledTx;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_tx()
    }
}

/// Head transaction of one sender, ranked by the price it pays.
#[derive(Debug, Clone)]
struct PriceHead {
    price: u128,
    tx: PooledTx,
}

impl PartialEq for PriceHead {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PriceHead {}

impl PartialOrd for PriceHead {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PriceHead {
    // Higher price first; on equal price the lower sender address wins.
    fn cmp(&self, other: &Self) -> Ordering {
        self.price
            .cmp(&other.price)
            .then_with(|| other.tx.signer().cmp(&self.tx.signer()))
    }
}

/// Merges per-sender nonce queues by descending effective gas price.
///
/// Only the lowest-nonce transaction of each sender competes at any time.
/// Consuming it with [`TransactionsStream::shift`] makes the sender's next
/// nonce eligible.
#[derive(Debug, Clone, Default)]
pub struct TransactionsByPriceAndNonce {
    heads: BinaryHeap<PriceHead>,
    queues: HashMap<Address, VecDeque<PooledTx>>,
    base_fee: Option<u64>,
}

impl TransactionsByPriceAndNonce {
    /// Builds the ordering from transaction groups keyed by their recovered
    /// sender. Groups need not be sorted; each is ordered by nonce here.
    /// Groups sharing a sender are merged into one queue.
    ///
    /// `base_fee` is the base fee of the block being built, if London is
    /// active there.
    pub fn new(
        groups: impl IntoIterator<Item = (Address, Vec<TxEnvelope>)>,
        base_fee: Option<u64>,
    ) -> Self {
        let mut this = Self {
            base_fee,
            ..Default::default()
        };

        let mut by_sender: HashMap<Address, Vec<TxEnvelope>> = HashMap::new();
        for (sender, txs) in groups {
            by_sender.entry(sender).or_default().extend(txs);
        }

        for (sender, mut txs) in by_sender {
            txs.sort_by_key(|tx| tx.nonce());
            let mut queue: VecDeque<PooledTx> = txs
                .into_iter()
                .map(|tx| Recovered::new_unchecked(tx, sender))
                .collect();
            let Some(head) = queue.pop_front() else {
                continue;
            };
            this.push_head(head);
            if !queue.is_empty() {
                this.queues.insert(sender, queue);
            }
        }

        this
    }

    fn push_head(&mut self, tx: PooledTx) {
        let price = tx.inner().effective_gas_price(self.base_fee);
        self.heads.push(PriceHead { price, tx });
    }

    /// Number of transactions not yet consumed.
    pub fn len(&self) -> usize {
        self.heads.len() + self.queues.values().map(VecDeque::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.heads.is_empty()
    }
}

impl TransactionsStream for TransactionsByPriceAndNonce {
    fn peek(&self) -> Option<&PooledTx> {
        self.heads.peek().map(|head| &head.tx)
    }

    fn shift(&mut self) {
        let Some(head) = self.heads.pop() else {
            return;
        };
        let sender = head.tx.signer();
        let Some(queue) = self.queues.get_mut(&sender) else {
            return;
        };
        let next = queue.pop_front();
        if queue.is_empty() {
            self.queues.remove(&sender);
        }
        if let Some(next) = next {
            self.push_head(next);
        }
    }

    fn pop(&mut self) {
        if let Some(head) = self.heads.pop() {
            self.queues.remove(&head.tx.signer());
        }
    }
}

impl Iterator for TransactionsByPriceAndNonce {
    type Item = PooledTx;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_tx()
    }
}
