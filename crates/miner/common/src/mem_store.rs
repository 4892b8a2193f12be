//! In-memory chain storage.

use std::collections::{BTreeMap, HashMap};

use alloy_consensus::{Block, BlockBody, Header, TxEnvelope};
use alloy_primitives::B256;

use crate::{ChainReader, StorageResult};

/// Chain storage kept entirely in memory.
///
/// Useful for tests and tooling. Headers may be stored with or without a
/// body; only headers with a body are returned by [`ChainReader::block`].
#[derive(Debug, Clone, Default)]
pub struct MemChainStore {
    headers: HashMap<B256, Header>,
    bodies: HashMap<B256, BlockBody<TxEnvelope>>,
    by_number: BTreeMap<u64, Vec<B256>>,
    canonical: BTreeMap<u64, B256>,
    last_executed: u64,
}

impl MemChainStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a header without a body. Returns its hash.
    pub fn put_header(&mut self, header: Header) -> B256 {
        let hash = header.hash_slow();
        let number = header.number;
        if self.headers.insert(hash, header).is_none() {
            self.by_number.entry(number).or_default().push(hash);
        }
        hash
    }

    /// Stores a block off the canonical chain. Returns its hash.
    pub fn put_block(&mut self, block: Block<TxEnvelope>) -> B256 {
        let Block { header, body } = block;
        let hash = self.put_header(header);
        self.bodies.insert(hash, body);
        hash
    }

    /// Stores a block and makes it canonical at its height. Returns its hash.
    pub fn put_canonical_block(&mut self, block: Block<TxEnvelope>) -> B256 {
        let number = block.header.number;
        let hash = self.put_block(block);
        self.canonical.insert(number, hash);
        hash
    }

    pub fn set_last_executed(&mut self, number: u64) {
        self.last_executed = number;
    }

    /// Returns the canonical hash at `number`.
    pub fn canonical_hash(&self, number: u64) -> Option<B256> {
        self.canonical.get(&number).copied()
    }
}

impl ChainReader for MemChainStore {
    fn header_by_number(&self, number: u64) -> StorageResult<Option<Header>> {
        Ok(self
            .canonical
            .get(&number)
            .and_then(|hash| self.headers.get(hash))
            .cloned())
    }

    fn header_number(&self, hash: &B256) -> StorageResult<Option<u64>> {
        Ok(self.headers.get(hash).map(|header| header.number))
    }

    fn block(&self, hash: &B256, number: u64) -> StorageResult<Option<Block<TxEnvelope>>> {
        let Some(header) = self.headers.get(hash).filter(|h| h.number == number) else {
            return Ok(None);
        };
        Ok(self.bodies.get(hash).map(|body| Block {
            header: header.clone(),
            body: body.clone(),
        }))
    }

    fn headers_by_number(&self, number: u64) -> StorageResult<Vec<Header>> {
        Ok(self
            .by_number
            .get(&number)
            .into_iter()
            .flatten()
            .filter_map(|hash| self.headers.get(hash))
            .cloned()
            .collect())
    }

    fn last_executed_block(&self) -> StorageResult<u64> {
        Ok(self.last_executed)
    }
}
