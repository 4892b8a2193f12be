//! Test utilities for block assembly tests.

use alloy::signers::{local::PrivateKeySigner, SignerSync};
use alloy_consensus::{
    transaction::Recovered, Block, BlockBody, Header, SignableTransaction, TxEip1559, TxEnvelope,
    TxLegacy,
};
use alloy_primitives::{Address, ChainId, Signature, TxKind, B256, U256};
use miner_common::{
    ChainReader, ConsensusEngine, EngineError, MemChainStore, PooledTx, StorageError,
    StorageResult,
};

use crate::Clock;

/// Timestamp of the genesis block built by [`build_chain`].
pub(crate) const GENESIS_TIMESTAMP: u64 = 1_000_000;

/// Seconds between consecutive blocks built by [`build_chain`].
pub(crate) const BLOCK_TIME: u64 = 12;

/// Gas limit of every block built by [`build_chain`].
pub(crate) const TEST_GAS_LIMIT: u64 = 8_000_000;

/// Clock frozen at a fixed second.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FixedClock(pub(crate) u64);

impl Clock for FixedClock {
    fn now_secs(&self) -> u64 {
        self.0
    }
}

/// Engine crediting blocks to their coinbase and bumping difficulty by one.
#[derive(Debug, Default)]
pub(crate) struct TestEngine;

impl ConsensusEngine for TestEngine {
    fn author(&self, header: &Header) -> Result<Address, EngineError> {
        Ok(header.beneficiary)
    }

    fn prepare(&self, parent: &Header, header: &mut Header) -> Result<(), EngineError> {
        header.difficulty = parent.difficulty + U256::from(1);
        Ok(())
    }
}

/// Storage that fails the test on any access.
#[derive(Debug)]
pub(crate) struct UnreachableStore;

impl ChainReader for UnreachableStore {
    fn header_by_number(&self, _number: u64) -> StorageResult<Option<Header>> {
        panic!("storage accessed")
    }

    fn header_number(&self, _hash: &B256) -> StorageResult<Option<u64>> {
        panic!("storage accessed")
    }

    fn block(&self, _hash: &B256, _number: u64) -> StorageResult<Option<Block<TxEnvelope>>> {
        panic!("storage accessed")
    }

    fn headers_by_number(&self, _number: u64) -> StorageResult<Vec<Header>> {
        panic!("storage accessed")
    }

    fn last_executed_block(&self) -> StorageResult<u64> {
        panic!("storage accessed")
    }
}

/// Read served by [`FailingStore`] with an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FailingRead {
    HeadersByNumber,
    HeaderNumber,
    Block,
    LastExecuted,
}

/// Storage wrapping a [`MemChainStore`] where one kind of read fails.
#[derive(Debug)]
pub(crate) struct FailingStore {
    pub(crate) inner: MemChainStore,
    pub(crate) read: FailingRead,
}

impl FailingStore {
    pub(crate) fn new(inner: MemChainStore, read: FailingRead) -> Self {
        Self { inner, read }
    }

    fn check(&self, read: FailingRead) -> StorageResult<()> {
        if self.read == read {
            return Err(StorageError::database(format!("{read:?} unavailable")));
        }
        Ok(())
    }
}

impl ChainReader for FailingStore {
    fn header_by_number(&self, number: u64) -> StorageResult<Option<Header>> {
        self.inner.header_by_number(number)
    }

    fn header_number(&self, hash: &B256) -> StorageResult<Option<u64>> {
        self.check(FailingRead::HeaderNumber)?;
        self.inner.header_number(hash)
    }

    fn block(&self, hash: &B256, number: u64) -> StorageResult<Option<Block<TxEnvelope>>> {
        self.check(FailingRead::Block)?;
        self.inner.block(hash, number)
    }

    fn headers_by_number(&self, number: u64) -> StorageResult<Vec<Header>> {
        self.check(FailingRead::HeadersByNumber)?;
        self.inner.headers_by_number(number)
    }

    fn last_executed_block(&self) -> StorageResult<u64> {
        self.check(FailingRead::LastExecuted)?;
        self.inner.last_executed_block()
    }
}

/// A canonical chain stored in memory.
#[derive(Debug)]
pub(crate) struct TestChain {
    pub(crate) store: MemChainStore,
    hashes: Vec<B256>,
}

impl TestChain {
    /// Hash of the canonical block at `number`.
    pub(crate) fn hash(&self, number: u64) -> B256 {
        self.hashes[number as usize]
    }

    pub(crate) fn head(&self) -> u64 {
        self.hashes.len() as u64 - 1
    }

    /// Appends a canonical block citing `ommers`. Returns its hash.
    pub(crate) fn push_block_with_ommers(&mut self, ommers: Vec<Header>) -> B256 {
        let number = self.head() + 1;
        let header = chain_header(number, self.hash(number - 1));
        let hash = self.store.put_canonical_block(Block {
            header,
            body: empty_body(ommers),
        });
        self.store.set_last_executed(number);
        self.hashes.push(hash);
        hash
    }

    /// Stores a side-chain header at `number` and returns it.
    pub(crate) fn add_side_header(
        &mut self,
        number: u64,
        parent_hash: B256,
        beneficiary: Address,
        salt: u8,
    ) -> Header {
        let header = side_header(number, parent_hash, beneficiary, salt);
        self.store.put_header(header.clone());
        header
    }
}

fn empty_body(ommers: Vec<Header>) -> BlockBody<TxEnvelope> {
    BlockBody {
        transactions: vec![],
        ommers,
        withdrawals: None,
    }
}

fn chain_header(number: u64, parent_hash: B256) -> Header {
    Header {
        number,
        parent_hash,
        timestamp: GENESIS_TIMESTAMP + number * BLOCK_TIME,
        gas_limit: TEST_GAS_LIMIT,
        difficulty: U256::from(number),
        ..Default::default()
    }
}

/// Builds canonical blocks `0..=head`, marking `head` as last executed.
pub(crate) fn build_chain(head: u64) -> TestChain {
    let mut store = MemChainStore::new();
    let mut hashes = Vec::new();
    let mut parent_hash = B256::ZERO;
    for number in 0..=head {
        let hash = store.put_canonical_block(Block {
            header: chain_header(number, parent_hash),
            body: empty_body(vec![]),
        });
        hashes.push(hash);
        parent_hash = hash;
    }
    store.set_last_executed(head);
    TestChain { store, hashes }
}

/// A header off the canonical chain; `salt` keeps otherwise equal headers
/// distinct.
pub(crate) fn side_header(
    number: u64,
    parent_hash: B256,
    beneficiary: Address,
    salt: u8,
) -> Header {
    Header {
        number,
        parent_hash,
        beneficiary,
        extra_data: vec![0xee, salt].into(),
        ..Default::default()
    }
}

/// Deterministic test account.
pub(crate) fn test_key(seed: u8) -> PrivateKeySigner {
    PrivateKeySigner::from_bytes(&B256::repeat_byte(seed)).unwrap()
}

/// A legacy transaction signed by `key`.
pub(crate) fn signed_legacy(
    key: &PrivateKeySigner,
    chain_id: Option<ChainId>,
    nonce: u64,
    gas_price: u128,
) -> TxEnvelope {
    let tx = TxLegacy {
        chain_id,
        nonce,
        gas_price,
        gas_limit: 21_000,
        to: TxKind::Call(Address::repeat_byte(0x42)),
        value: U256::from(1),
        ..Default::default()
    };
    let sig = key.sign_hash_sync(&tx.signature_hash()).unwrap();
    TxEnvelope::Legacy(tx.into_signed(sig))
}

/// A legacy transaction with a placeholder signature, for ordering tests
/// where the sender is supplied explicitly.
pub(crate) fn unsigned_legacy(nonce: u64, gas_price: u128) -> TxEnvelope {
    let tx = TxLegacy {
        chain_id: Some(1),
        nonce,
        gas_price,
        gas_limit: 21_000,
        to: TxKind::Call(Address::repeat_byte(0x42)),
        ..Default::default()
    };
    TxEnvelope::Legacy(tx.into_signed(placeholder_signature()))
}

/// A dynamic fee transaction with a placeholder signature.
pub(crate) fn unsigned_dynamic_fee(
    nonce: u64,
    max_fee_per_gas: u128,
    max_priority_fee_per_gas: u128,
) -> TxEnvelope {
    let tx = TxEip1559 {
        chain_id: 1,
        nonce,
        gas_limit: 21_000,
        max_fee_per_gas,
        max_priority_fee_per_gas,
        to: TxKind::Call(Address::repeat_byte(0x42)),
        ..Default::default()
    };
    TxEnvelope::Eip1559(tx.into_signed(placeholder_signature()))
}

fn placeholder_signature() -> Signature {
    Signature::new(U256::from(1), U256::from(1), false)
}

/// Pairs `tx` with `sender` without recovering.
pub(crate) fn pooled(tx: TxEnvelope, sender: Address) -> PooledTx {
    Recovered::new_unchecked(tx, sender)
}
