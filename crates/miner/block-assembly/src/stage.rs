//! The create-block stage of the mining pipeline.

use miner_common::{
    ChainConfig, ChainReader, ConsensusEngine, MiningBlock, MiningConfig, MiningState,
};
use tracing::*;

use crate::{
    build_header, next_block_base_fee, read_non_canonical_headers, scan_family, select_uncles,
    Clock, MiningError, MiningResult, SystemClock, TxSource, TxStreamRequest, TxStreams,
    ANCESTOR_DEPTH,
};

/// Assembles the unsealed proposal for the block after the last executed
/// one.
///
/// Holds only configuration and collaborators; each call to
/// [`create_block`](Self::create_block) is an independent attempt.
#[derive(Debug)]
pub struct CreateBlockStage<E, T, K = SystemClock> {
    mining: MiningConfig,
    chain: ChainConfig,
    engine: E,
    tx_source: T,
    clock: K,
}

impl<E, T> CreateBlockStage<E, T>
where
    E: ConsensusEngine,
    T: TxSource,
{
    pub fn new(mining: MiningConfig, chain: ChainConfig, engine: E, tx_source: T) -> Self {
        Self {
            mining,
            chain,
            engine,
            tx_source,
            clock: SystemClock,
        }
    }
}

impl<E, T, K> CreateBlockStage<E, T, K>
where
    E: ConsensusEngine,
    T: TxSource,
    K: Clock,
{
    /// Replaces the time source used for header timestamps.
    pub fn with_clock<K2: Clock>(self, clock: K2) -> CreateBlockStage<E, T, K2> {
        CreateBlockStage {
            mining: self.mining,
            chain: self.chain,
            engine: self.engine,
            tx_source: self.tx_source,
            clock,
        }
    }

    pub fn mining_config(&self) -> &MiningConfig {
        &self.mining
    }

    pub fn chain_config(&self) -> &ChainConfig {
        &self.chain
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn tx_source(&self) -> &T {
        &self.tx_source
    }

    /// Builds the proposal on top of the last executed block of `chain`.
    ///
    /// `chain` must be a single consistent snapshot for the whole call.
    /// Nothing is returned on failure; there is no partially filled record.
    pub fn create_block(&self, chain: &impl ChainReader) -> MiningResult<MiningBlock> {
        let coinbase = self.mining.etherbase();
        if coinbase.is_zero() {
            return Err(MiningError::ZeroCoinbase);
        }
        self.mining.validate()?;

        let parent_number = chain.last_executed_block()?;
        let parent = chain
            .header_by_number(parent_number)?
            .ok_or(MiningError::ParentNotFound {
                number: parent_number,
            })?;
        let parent_hash = parent.hash_slow();
        let number = parent_number.saturating_add(1);
        info!(component = "miner_create_block", block = number, "start mine");

        let TxStreams { local, remote } = self.tx_source.build_streams(TxStreamRequest {
            chain: &self.chain,
            block_number: number,
            base_fee: next_block_base_fee(&self.chain, &parent)?,
        })?;

        let mut locals = self.tx_source.local_addresses();
        locals.push(coinbase);
        let mut candidates = read_non_canonical_headers(chain, number, &self.engine, &locals)?;

        let family = scan_family(chain, parent_hash, ANCESTOR_DEPTH)?;
        let header = build_header(&self.mining, &self.chain, &parent, &self.engine, &self.clock)?;
        let uncles = select_uncles(&mut candidates, &family, parent_hash, number);

        info!(
            component = "miner_create_block",
            block = number,
            uncles = uncles.len(),
            has_local_txs = !local.is_empty(),
            has_remote_txs = !remote.is_empty(),
            "prepared block proposal"
        );
        Ok(MiningBlock::new(header, uncles, local, remote))
    }
}

/// Runs one create-block attempt and records the outcome in `state`.
///
/// The previous record is discarded up front, so after an error `state`
/// holds no block.
pub fn spawn_create_block<E, T, K>(
    state: &mut MiningState,
    stage: &CreateBlockStage<E, T, K>,
    chain: &impl ChainReader,
) -> MiningResult<()>
where
    E: ConsensusEngine,
    T: TxSource,
    K: Clock,
{
    state.clear();
    match stage.create_block(chain) {
        Ok(block) => {
            state.replace(block);
            Ok(())
        }
        Err(err) => {
            error!(component = "miner_create_block", %err, "failed to create block");
            Err(err)
        }
    }
}
