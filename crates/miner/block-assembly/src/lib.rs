//! Block proposal assembly for the miner.
//!
//! Given the chain head, the transaction pool and the known side-chain
//! headers, builds the unsealed header, picks the uncles to cite and prepares
//! the transaction streams the execution stage will draw from.

mod clock;
mod error;
mod family;
mod header;
mod ordering;
mod stage;
#[cfg(test)]
mod test_utils;
mod tx_source;
mod uncles;

pub use clock::{Clock, SystemClock};
pub use error::{MiningError, MiningResult};
pub use family::{scan_family, FamilySets, ANCESTOR_DEPTH};
pub use header::{apply_dao_extra_override, build_header, next_block_base_fee, next_timestamp};
pub use ordering::{TransactionsByPriceAndNonce, TransactionsFixedOrder};
pub use stage::{spawn_create_block, CreateBlockStage};
pub use tx_source::{
    BestOrderSource, GroupedBySenderSource, TxSource, TxStreamRequest, TxStreams,
    BEST_TXS_BATCH_SIZE,
};
pub use uncles::{
    read_non_canonical_headers, select_uncles, UncleCandidates, UncleRejection, MAX_UNCLES,
    STALE_THRESHOLD,
};
