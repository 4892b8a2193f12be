//! Fork-dependent transaction sender recovery.

use alloy_consensus::{transaction::SignerRecoverable, Transaction, TxEnvelope, TxType};
use alloy_primitives::{Address, ChainId};
use thiserror::Error;

use crate::ChainConfig;

/// Signature rules in force at a given block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signer {
    /// Legacy transactions only, high-s signatures accepted.
    Frontier,
    /// Legacy transactions only, low-s signatures required (EIP-2).
    Homestead,
    /// Replay protected legacy transactions (EIP-155).
    Eip155 { chain_id: ChainId },
    /// Adds access list transactions (EIP-2930).
    Berlin { chain_id: ChainId },
    /// Adds dynamic fee transactions (EIP-1559).
    London { chain_id: ChainId },
}

impl Signer {
    /// Picks the signer for transactions included in block `number`.
    pub fn for_block(chain: &ChainConfig, number: u64) -> Self {
        let chain_id = chain.chain_id;
        if chain.is_london(number) {
            Self::London { chain_id }
        } else if chain.is_berlin(number) {
            Self::Berlin { chain_id }
        } else if chain.is_eip155(number) {
            Self::Eip155 { chain_id }
        } else if chain.is_homestead(number) {
            Self::Homestead
        } else {
            Self::Frontier
        }
    }

    /// Chain id enforced on protected transactions, if replay protection is
    /// active.
    pub fn chain_id(&self) -> Option<ChainId> {
        match self {
            Self::Frontier | Self::Homestead => None,
            Self::Eip155 { chain_id } | Self::Berlin { chain_id } | Self::London { chain_id } => {
                Some(*chain_id)
            }
        }
    }

    /// Returns true if transactions of `tx_type` are valid under this signer.
    pub fn supports(&self, tx_type: TxType) -> bool {
        match tx_type {
            TxType::Legacy => true,
            TxType::Eip2930 => matches!(self, Self::Berlin { .. } | Self::London { .. }),
            TxType::Eip1559 => matches!(self, Self::London { .. }),
            _ => false,
        }
    }

    /// Recovers the address that signed `tx`.
    pub fn sender(&self, tx: &TxEnvelope) -> Result<Address, SignerError> {
        let tx_type = tx.tx_type();
        if !self.supports(tx_type) {
            return Err(SignerError::UnsupportedTxType(tx_type));
        }

        match (self.chain_id(), tx.chain_id()) {
            (None, Some(_)) => return Err(SignerError::ProtectedBeforeEip155),
            (Some(expected), Some(actual)) if expected != actual => {
                return Err(SignerError::ChainIdMismatch { expected, actual });
            }
            _ => {}
        }

        let recovered = match self {
            Self::Frontier => tx.recover_signer_unchecked(),
            _ => tx.recover_signer(),
        };
        recovered.map_err(|err| SignerError::Recovery(err.to_string()))
    }
}

/// Reasons a transaction sender cannot be recovered.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignerError {
    #[error("transaction type {0:?} not supported by signer")]
    UnsupportedTxType(TxType),

    #[error("invalid chain id: expected {expected}, got {actual}")]
    ChainIdMismatch { expected: ChainId, actual: ChainId },

    #[error("replay protected transaction before EIP-155")]
    ProtectedBeforeEip155,

    #[error("signature recovery: {0}")]
    Recovery(String),
}
