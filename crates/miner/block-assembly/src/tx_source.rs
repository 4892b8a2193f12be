//! Pool backends that feed the transaction streams.

use alloy_consensus::{transaction::Recovered, TxEnvelope};
use alloy_eips::eip2718::Decodable2718;
use alloy_primitives::Address;
use miner_common::{BestTxPool, ChainConfig, LegacyTxPool, PooledTx, Signer, TransactionsStream};
use tracing::*;

use crate::{MiningError, MiningResult, TransactionsByPriceAndNonce, TransactionsFixedOrder};

/// Number of transactions requested from a best-order pool per attempt.
pub const BEST_TXS_BATCH_SIZE: usize = 200;

/// What a source needs to know about the block being built.
#[derive(Debug, Clone, Copy)]
pub struct TxStreamRequest<'a> {
    pub chain: &'a ChainConfig,
    pub block_number: u64,
    pub base_fee: Option<u64>,
}

/// The two streams the execution stage draws from, locals first.
#[derive(Debug)]
pub struct TxStreams {
    pub local: Box<dyn TransactionsStream>,
    pub remote: Box<dyn TransactionsStream>,
}

/// A configured transaction pool backend.
pub trait TxSource {
    /// Addresses the operator marked as local.
    fn local_addresses(&self) -> Vec<Address>;

    /// Reads the pool and builds the streams for one mining attempt.
    fn build_streams(&self, req: TxStreamRequest<'_>) -> MiningResult<TxStreams>;
}

/// Backend over a pool that already ranks its transactions.
///
/// Everything lands in the remote stream in the pool's order.
#[derive(Debug)]
pub struct BestOrderSource<P> {
    pool: P,
    locals: Vec<Address>,
    batch_size: usize,
}

impl<P: BestTxPool> BestOrderSource<P> {
    pub fn new(pool: P) -> Self {
        Self {
            pool,
            locals: Vec::new(),
            batch_size: BEST_TXS_BATCH_SIZE,
        }
    }

    /// Sets the local addresses reported for uncle classification.
    pub fn with_locals(mut self, locals: Vec<Address>) -> Self {
        self.locals = locals;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn pool(&self) -> &P {
        &self.pool
    }
}

impl<P: BestTxPool> TxSource for BestOrderSource<P> {
    fn local_addresses(&self) -> Vec<Address> {
        self.locals.clone()
    }

    fn build_streams(&self, _req: TxStreamRequest<'_>) -> MiningResult<TxStreams> {
        let slots = self.pool.best(self.batch_size)?;

        let txs = slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                let tx = TxEnvelope::decode_2718_exact(slot.rlp.as_ref())
                    .map_err(|source| MiningError::TxDecode { index, source })?;
                Ok(Recovered::new_unchecked(tx, slot.sender))
            })
            .collect::<MiningResult<Vec<PooledTx>>>()?;

        Ok(TxStreams {
            local: Box::new(TransactionsFixedOrder::default()),
            remote: Box::new(TransactionsFixedOrder::new(txs)),
        })
    }
}

/// Backend over a pool that groups pending transactions by sender.
///
/// Senders are recovered with the signer active at the new block and groups
/// are split into local and remote price/nonce streams.
#[derive(Debug)]
pub struct GroupedBySenderSource<P> {
    pool: P,
}

impl<P: LegacyTxPool> GroupedBySenderSource<P> {
    pub fn new(pool: P) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &P {
        &self.pool
    }
}

impl<P: LegacyTxPool> TxSource for GroupedBySenderSource<P> {
    fn local_addresses(&self) -> Vec<Address> {
        self.pool.locals()
    }

    fn build_streams(&self, req: TxStreamRequest<'_>) -> MiningResult<TxStreams> {
        let pending = self.pool.pending()?;
        let locals = self.pool.locals();
        let signer = Signer::for_block(req.chain, req.block_number);

        let mut local_groups = Vec::new();
        let mut remote_groups = Vec::new();
        for (pool_sender, txs) in pending {
            let Some(first) = txs.first() else {
                continue;
            };
            let sender = match signer.sender(first) {
                Ok(sender) => sender,
                Err(err) => {
                    warn!(
                        component = "miner_create_block",
                        %pool_sender,
                        %err,
                        "skipping pending group with unrecoverable sender"
                    );
                    continue;
                }
            };

            if locals.contains(&sender) {
                local_groups.push((sender, txs));
            } else {
                remote_groups.push((sender, txs));
            }
        }

        Ok(TxStreams {
            local: Box::new(TransactionsByPriceAndNonce::new(local_groups, req.base_fee)),
            remote: Box::new(TransactionsByPriceAndNonce::new(remote_groups, req.base_fee)),
        })
    }
}
