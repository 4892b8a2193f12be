//! Recent lineage of the chain head.

use std::collections::HashSet;

use alloy_primitives::B256;
use miner_common::{ChainReader, StorageResult};

/// Number of blocks walked back from the parent. Matches the uncle reward
/// window.
pub const ANCESTOR_DEPTH: usize = 7;

/// Hashes of the recent canonical lineage and everything it already cites.
///
/// `family` is always a superset of `ancestors`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FamilySets {
    pub(crate) ancestors: HashSet<B256>,
    pub(crate) family: HashSet<B256>,
}

impl FamilySets {
    /// Returns true if `hash` is one of the walked blocks.
    pub fn is_ancestor(&self, hash: &B256) -> bool {
        self.ancestors.contains(hash)
    }

    /// Returns true if `hash` is a walked block or an uncle one of them
    /// included.
    pub fn in_family(&self, hash: &B256) -> bool {
        self.family.contains(hash)
    }

    pub fn ancestors(&self) -> &HashSet<B256> {
        &self.ancestors
    }

    pub fn family(&self) -> &HashSet<B256> {
        &self.family
    }

    fn add_ancestor(&mut self, hash: B256) {
        self.ancestors.insert(hash);
        self.family.insert(hash);
    }
}

/// Walks up to `depth` blocks back from `from` (inclusive) through stored
/// blocks.
///
/// The walk stops early at the first block storage does not have, which is
/// the normal case near genesis. Only storage failures are errors.
pub fn scan_family(
    chain: &impl ChainReader,
    from: B256,
    depth: usize,
) -> StorageResult<FamilySets> {
    let mut sets = FamilySets::default();
    let Some(mut number) = chain.header_number(&from)? else {
        return Ok(sets);
    };

    let mut hash = from;
    for _ in 0..depth {
        let Some(block) = chain.block(&hash, number)? else {
            break;
        };

        for ommer in &block.body.ommers {
            sets.family.insert(ommer.hash_slow());
        }
        sets.add_ancestor(hash);

        let Some(parent_number) = number.checked_sub(1) else {
            break;
        };
        number = parent_number;
        hash = block.header.parent_hash;
    }

    Ok(sets)
}
