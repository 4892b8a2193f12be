//! Unsealed header construction.

use alloy_consensus::Header;
use alloy_eips::eip1559::{calc_next_block_base_fee, BaseFeeParams, INITIAL_BASE_FEE};
use alloy_primitives::Bytes;
use miner_common::{
    calc_gas_limit, ChainConfig, ConsensusEngine, MiningConfig, StorageError, StorageResult,
    DAO_FORK_BLOCK_EXTRA,
};
use tracing::*;

use crate::{Clock, MiningError, MiningResult};

/// Timestamp for a child of a block stamped `parent_timestamp`, never equal
/// to or before it.
pub fn next_timestamp(parent_timestamp: u64, now: u64) -> u64 {
    now.max(parent_timestamp.saturating_add(1))
}

/// Base fee of the block following `parent`, or `None` before London.
///
/// The first London block starts at [`INITIAL_BASE_FEE`]. A London parent
/// without a base fee is corrupt storage.
pub fn next_block_base_fee(chain: &ChainConfig, parent: &Header) -> StorageResult<Option<u64>> {
    let number = parent.number.saturating_add(1);
    if !chain.is_london(number) {
        return Ok(None);
    }
    if !chain.is_london(parent.number) {
        return Ok(Some(INITIAL_BASE_FEE));
    }
    let base_fee = parent.base_fee_per_gas.ok_or_else(|| {
        StorageError::corrupted(format!("london block {} has no base fee", parent.number))
    })?;
    Ok(Some(calc_next_block_base_fee(
        parent.gas_used,
        parent.gas_limit,
        base_fee,
        BaseFeeParams::ethereum(),
    )))
}

/// Builds the unsealed header of the block following `parent`.
///
/// The consensus engine fills in its own fields before the DAO extra-data
/// rule is applied.
pub fn build_header(
    mining: &MiningConfig,
    chain: &ChainConfig,
    parent: &Header,
    engine: &impl ConsensusEngine,
    clock: &impl Clock,
) -> MiningResult<Header> {
    if mining.etherbase().is_zero() {
        return Err(MiningError::ZeroCoinbase);
    }

    let parent_hash = parent.hash_slow();
    let mut header = Header {
        parent_hash,
        number: parent.number.saturating_add(1),
        gas_limit: calc_gas_limit(
            parent.gas_used,
            parent.gas_limit,
            mining.gas_floor(),
            mining.gas_ceil(),
        ),
        extra_data: mining.extra_data().clone(),
        timestamp: next_timestamp(parent.timestamp, clock.now_secs()),
        beneficiary: mining.etherbase(),
        base_fee_per_gas: next_block_base_fee(chain, parent)?,
        ..Default::default()
    };

    if let Err(source) = engine.prepare(parent, &mut header) {
        error!(
            component = "miner_create_block",
            %source,
            header_number = header.number,
            header_root = %header.state_root,
            header_parent_hash = %header.parent_hash,
            parent_number = parent.number,
            %parent_hash,
            "failed to prepare header for mining"
        );
        return Err(MiningError::Prepare {
            number: header.number,
            source,
        });
    }

    apply_dao_extra_override(chain, &mut header);
    Ok(header)
}

/// Forces or strips the DAO fork extra-data inside the fork's override
/// window. Outside the window, or on chains without the fork, does nothing.
pub fn apply_dao_extra_override(chain: &ChainConfig, header: &mut Header) {
    if !chain.is_dao_extra_range(header.number) {
        return;
    }
    if chain.dao_fork_support {
        header.extra_data = Bytes::from_static(DAO_FORK_BLOCK_EXTRA);
    } else if header.extra_data.as_ref() == DAO_FORK_BLOCK_EXTRA {
        header.extra_data = Bytes::new();
    }
}
