//! Redemption SDK seam.
//!
//! The SDK owns the redemption mechanics (which lots are retired, batching,
//! matching). The exchange only supplies a provider/signer session and
//! validated inputs, then surfaces the receipt.

use std::sync::Arc;

use alloy::primitives::U256;
use async_trait::async_trait;
use thiserror::Error;

use crate::blockchain::types::{ChainId, TransactionOutcome};
use crate::blockchain::wallet::TransactionSigner;

/// Failures reported by a redemption SDK.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SdkError {
    #[error("token '{0}' is not redeemable on this network")]
    UnsupportedToken(String),

    #[error("rejected by wallet: {0}")]
    Rejected(String),

    #[error("reverted: {0}")]
    Reverted(String),

    #[error("{0}")]
    Transport(String),
}

/// Provider and signer the SDK acts through, both taken from the same wallet.
#[derive(Clone)]
pub struct SdkSession {
    network: String,
    chain_id: ChainId,
    signer: Arc<dyn TransactionSigner>,
}

impl SdkSession {
    pub fn new(network: impl Into<String>, chain_id: ChainId, signer: Arc<dyn TransactionSigner>) -> Self {
        Self {
            network: network.into(),
            chain_id,
            signer,
        }
    }

    /// Network name the session was configured for.
    pub fn network(&self) -> &str {
        &self.network
    }

    /// Chain the wallet reported when the session was established.
    pub fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    pub fn signer(&self) -> &Arc<dyn TransactionSigner> {
        &self.signer
    }
}

impl std::fmt::Debug for SdkSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SdkSession")
            .field("network", &self.network)
            .field("chain_id", &self.chain_id)
            .field("signer", &self.signer.address())
            .finish()
    }
}

/// An SDK able to redeem a token automatically.
#[async_trait]
pub trait RedemptionSdk: Send + Sync {
    /// Redeem `amount` (smallest unit) of `token_id`, letting the SDK pick
    /// what gets retired.
    async fn redeem_auto(
        &self,
        session: &SdkSession,
        token_id: &str,
        amount: U256,
    ) -> Result<TransactionOutcome, SdkError>;
}
