//! Uncle candidate collection and admission.

use std::collections::{BTreeMap, HashSet};

use alloy_consensus::Header;
use alloy_primitives::{Address, B256};
use miner_common::{ChainReader, ConsensusEngine, StorageResult};
use thiserror::Error;
use tracing::*;

use crate::FamilySets;

/// Maximum number of uncles a block may cite.
pub const MAX_UNCLES: usize = 2;

/// Candidates at least this many blocks below the new block are no longer
/// reward eligible.
pub const STALE_THRESHOLD: u64 = 7;

/// Headers stored at the new block's height, split by authorship.
///
/// Keys are header hashes and the two maps never share a key. Ordered maps
/// keep selection reproducible.
#[derive(Debug, Clone, Default)]
pub struct UncleCandidates {
    pub local: BTreeMap<B256, Header>,
    pub remote: BTreeMap<B256, Header>,
}

impl UncleCandidates {
    /// Looks a candidate up, local map first.
    pub fn get(&self, hash: &B256) -> Option<&Header> {
        self.local.get(hash).or_else(|| self.remote.get(hash))
    }

    pub fn len(&self) -> usize {
        self.local.len() + self.remote.len()
    }

    pub fn is_empty(&self) -> bool {
        self.local.is_empty() && self.remote.is_empty()
    }

    fn prune_stale(&mut self, number: u64) {
        for candidates in [&mut self.local, &mut self.remote] {
            candidates.retain(|hash, header| {
                let stale = header.number.saturating_add(STALE_THRESHOLD) <= number;
                if stale {
                    trace!(
                        component = "miner_create_block",
                        uncle = %hash,
                        uncle_number = header.number,
                        "pruning stale uncle candidate"
                    );
                }
                !stale
            });
        }
    }
}

/// Reads every header stored at `number` and classifies it as local when its
/// author is one of `locals`.
pub fn read_non_canonical_headers(
    chain: &impl ChainReader,
    number: u64,
    engine: &impl ConsensusEngine,
    locals: &[Address],
) -> StorageResult<UncleCandidates> {
    let mut candidates = UncleCandidates::default();
    for header in chain.headers_by_number(number)? {
        let hash = header.hash_slow();
        if engine.is_local_author(locals, &header) {
            candidates.local.insert(hash, header);
        } else {
            candidates.remote.insert(hash, header);
        }
    }
    Ok(candidates)
}

/// Why a candidate was not cited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UncleRejection {
    #[error("uncle not unique")]
    NotUnique,

    #[error("uncle is sibling")]
    Sibling,

    #[error("uncle's parent unknown")]
    UnknownParent,

    #[error("uncle already included")]
    AlreadyIncluded,
}

/// Accumulates admitted uncles for one block.
struct UncleSelector<'a> {
    family: &'a FamilySets,
    parent_hash: B256,
    selected: HashSet<B256>,
    order: Vec<B256>,
}

impl<'a> UncleSelector<'a> {
    fn new(family: &'a FamilySets, parent_hash: B256) -> Self {
        Self {
            family,
            parent_hash,
            selected: HashSet::new(),
            order: Vec::with_capacity(MAX_UNCLES),
        }
    }

    fn is_full(&self) -> bool {
        self.order.len() >= MAX_UNCLES
    }

    fn commit(&mut self, hash: B256, uncle: &Header) -> Result<(), UncleRejection> {
        if self.selected.contains(&hash) {
            return Err(UncleRejection::NotUnique);
        }
        if uncle.parent_hash == self.parent_hash {
            return Err(UncleRejection::Sibling);
        }
        if !self.family.is_ancestor(&uncle.parent_hash) {
            return Err(UncleRejection::UnknownParent);
        }
        if self.family.in_family(&hash) {
            return Err(UncleRejection::AlreadyIncluded);
        }

        self.selected.insert(hash);
        self.order.push(hash);
        Ok(())
    }
}

/// Picks up to [`MAX_UNCLES`] uncles for the block at `number` built on
/// `parent_hash`.
///
/// Stale candidates are removed from `candidates` first. Local candidates
/// are tried before remote ones and each map is walked in hash order.
/// Rejections are logged and skipped.
pub fn select_uncles(
    candidates: &mut UncleCandidates,
    family: &FamilySets,
    parent_hash: B256,
    number: u64,
) -> Vec<Header> {
    candidates.prune_stale(number);

    let mut selector = UncleSelector::new(family, parent_hash);
    'maps: for map in [&candidates.local, &candidates.remote] {
        for (hash, uncle) in map {
            if selector.is_full() {
                break 'maps;
            }
            match selector.commit(*hash, uncle) {
                Ok(()) => debug!(
                    component = "miner_create_block",
                    uncle = %hash,
                    block = number,
                    "committing new uncle to block"
                ),
                Err(reason) => trace!(
                    component = "miner_create_block",
                    uncle = %hash,
                    %reason,
                    "possible uncle rejected"
                ),
            }
        }
    }

    selector
        .order
        .iter()
        .filter_map(|hash| candidates.get(hash).cloned())
        .collect()
}
