//! Chain-specific types and error definitions.

use std::fmt;

use alloy::primitives::{Address, TxHash};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:#x})", self.0, self.0)
    }
}

/// The network a wallet reports it is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkContext {
    pub chain_id: ChainId,
}

/// Result of an accepted transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionOutcome {
    /// Hash of the accepted transaction.
    pub transaction_hash: TxHash,
    /// Address of a contract created by the transaction, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<Address>,
    /// Block the transaction was included in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
}

impl TransactionOutcome {
    /// Link to this transaction on a block explorer rooted at `explorer_base`.
    pub fn explorer_url(&self, explorer_base: &str) -> String {
        format!("{}/tx/{}", explorer_base.trim_end_matches('/'), self.transaction_hash)
    }
}

/// Errors raised by a wallet provider or signer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BlockchainError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// The user declined the signature request.
    #[error("Request rejected by wallet: {0}")]
    Rejected(String),

    /// Transaction was reverted on-chain.
    #[error("Transaction reverted: {0}")]
    Reverted(String),

    /// The transaction was broadcast but its receipt never arrived, so it
    /// may still be included.
    #[error("Transaction {tx_hash} submitted but not confirmed: {reason}")]
    Unconfirmed { tx_hash: TxHash, reason: String },

    /// The wallet exposes no account to sign with.
    #[error("Wallet exposes no accounts")]
    NoAccounts,

    /// Call output did not match the contract ABI.
    #[error("ABI decode error: {0}")]
    Decode(String),
}

/// Result type for blockchain operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_id_conversion() {
        let chain_id = ChainId::from(1u64);
        assert_eq!(chain_id.0, 1);
        assert_eq!(u64::from(chain_id), 1);
    }

    #[test]
    fn test_chain_id_display() {
        assert_eq!(ChainId(44787).to_string(), "44787 (0xaef3)");
    }

    #[test]
    fn test_explorer_url() {
        let outcome = TransactionOutcome {
            transaction_hash: TxHash::ZERO,
            contract_address: None,
            block_number: Some(7),
        };
        let url = outcome.explorer_url("https://alfajores.celoscan.io/");
        assert!(url.starts_with("https://alfajores.celoscan.io/tx/0x0000"));
    }

    #[test]
    fn test_error_display() {
        let err = BlockchainError::Timeout(10);
        assert_eq!(err.to_string(), "RPC timeout after 10 seconds");

        let err = BlockchainError::Unconfirmed {
            tx_hash: TxHash::ZERO,
            reason: "no receipt after 120 seconds".into(),
        };
        assert!(err.to_string().ends_with("submitted but not confirmed: no receipt after 120 seconds"));
    }
}
