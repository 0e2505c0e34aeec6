//! Typed failures surfaced by every exchange operation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::blockchain::types::ChainId;

/// Errors that can occur while driving an exchange operation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExchangeError {
    /// The wallet is attached to a different chain than the configured one.
    #[error("Network mismatch: expected chain {expected}, wallet is on chain {actual}")]
    NetworkMismatch { expected: ChainId, actual: ChainId },

    /// No injected wallet provider is available.
    #[error("Wallet unavailable: no wallet provider configured")]
    WalletUnavailable,

    /// The wallet provider failed while reporting its chain or handing out a signer.
    #[error("Provider error: {0}")]
    Provider(String),

    /// A read-only contract call failed.
    #[error("Contract read failed: {0}")]
    Read(String),

    /// A derived figure would divide by zero.
    #[error("Division by zero: {0} is zero")]
    DivisionByZero(&'static str),

    /// Tonnage or redemption amount is out of range or malformed.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Token identifier is empty or not part of the known catalogue.
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// The user declined the signature or the node rejected the transaction.
    #[error("Transaction rejected: {0}")]
    TransactionRejected(String),

    /// The redemption SDK reported a failure.
    #[error("Redemption failed: {0}")]
    RedemptionFailed(String),

    /// Any failure not covered by a more specific kind.
    #[error("Unknown error: {0}")]
    Unknown(String),
}

/// Result type for exchange operations.
pub type ExchangeResult<T> = Result<T, ExchangeError>;

/// Stable names of the failure kinds, as rendered to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    NetworkMismatch,
    WalletUnavailable,
    ProviderError,
    ReadError,
    DivisionByZero,
    InvalidAmount,
    InvalidToken,
    TransactionRejected,
    RedemptionFailed,
    UnknownError,
}

impl ErrorKind {
    /// Metric label for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NetworkMismatch => "network_mismatch",
            ErrorKind::WalletUnavailable => "wallet_unavailable",
            ErrorKind::ProviderError => "provider_error",
            ErrorKind::ReadError => "read_error",
            ErrorKind::DivisionByZero => "division_by_zero",
            ErrorKind::InvalidAmount => "invalid_amount",
            ErrorKind::InvalidToken => "invalid_token",
            ErrorKind::TransactionRejected => "transaction_rejected",
            ErrorKind::RedemptionFailed => "redemption_failed",
            ErrorKind::UnknownError => "unknown_error",
        }
    }
}

impl ExchangeError {
    /// The failure kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExchangeError::NetworkMismatch { .. } => ErrorKind::NetworkMismatch,
            ExchangeError::WalletUnavailable => ErrorKind::WalletUnavailable,
            ExchangeError::Provider(_) => ErrorKind::ProviderError,
            ExchangeError::Read(_) => ErrorKind::ReadError,
            ExchangeError::DivisionByZero(_) => ErrorKind::DivisionByZero,
            ExchangeError::InvalidAmount(_) => ErrorKind::InvalidAmount,
            ExchangeError::InvalidToken(_) => ErrorKind::InvalidToken,
            ExchangeError::TransactionRejected(_) => ErrorKind::TransactionRejected,
            ExchangeError::RedemptionFailed(_) => ErrorKind::RedemptionFailed,
            ExchangeError::Unknown(_) => ErrorKind::UnknownError,
        }
    }

    /// Whether the failure was detected locally, before any chain call.
    pub fn is_validation(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::InvalidAmount
                | ErrorKind::InvalidToken
                | ErrorKind::NetworkMismatch
                | ErrorKind::DivisionByZero
        )
    }
}
