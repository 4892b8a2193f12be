use alloy_consensus::Header;
use alloy_primitives::{Address, B256};
use thiserror::Error;

/// The consensus engine hooks used while assembling a block proposal.
#[cfg_attr(feature = "test-utils", mockall::automock)]
pub trait ConsensusEngine {
    /// Returns the address credited with sealing `header`.
    ///
    /// This may be the coinbase or an identity recovered from the seal,
    /// depending on the engine.
    fn author(&self, header: &Header) -> Result<Address, EngineError>;

    /// Fills in the engine specific fields of `header` (difficulty, mix
    /// digest, ...) before transactions are executed.
    fn prepare(&self, parent: &Header, header: &mut Header) -> Result<(), EngineError>;

    /// Returns true if `header` was produced by one of `locals`.
    ///
    /// Headers whose author cannot be determined are never local.
    fn is_local_author(&self, locals: &[Address], header: &Header) -> bool {
        self.author(header)
            .is_ok_and(|author| locals.contains(&author))
    }
}

/// Errors raised by the consensus engine.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("unknown ancestor {0}")]
    UnknownAncestor(B256),

    #[error("engine: {0}")]
    Other(String),
}

impl EngineError {
    /// Creates an invalid header error.
    pub fn invalid_header(msg: impl Into<String>) -> Self {
        Self::InvalidHeader(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reports the coinbase as author, except for headers without one.
    struct CoinbaseEngine;

    impl ConsensusEngine for CoinbaseEngine {
        fn author(&self, header: &Header) -> Result<Address, EngineError> {
            if header.beneficiary.is_zero() {
                return Err(EngineError::invalid_header("missing coinbase"));
            }
            Ok(header.beneficiary)
        }

        fn prepare(&self, _parent: &Header, _header: &mut Header) -> Result<(), EngineError> {
            Ok(())
        }
    }

    fn header_by(beneficiary: Address) -> Header {
        Header {
            beneficiary,
            ..Default::default()
        }
    }

    #[test]
    fn test_local_author_matches_any_local() {
        let locals = [Address::repeat_byte(1), Address::repeat_byte(2)];

        assert!(CoinbaseEngine.is_local_author(&locals, &header_by(Address::repeat_byte(2))));
        assert!(!CoinbaseEngine.is_local_author(&locals, &header_by(Address::repeat_byte(3))));
        assert!(!CoinbaseEngine.is_local_author(&[], &header_by(Address::repeat_byte(1))));
    }

    #[test]
    fn test_unknown_author_is_remote() {
        let locals = [Address::ZERO];

        assert!(!CoinbaseEngine.is_local_author(&locals, &header_by(Address::ZERO)));
    }
}
