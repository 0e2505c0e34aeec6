//! Injected wallet capabilities.
//!
//! The exchange never holds private keys. It asks a wallet for the chain it is
//! attached to and for a signer, and every state-changing call goes through
//! that signer's own signing prompt.
//!
//! [`RpcWallet`] talks to an EIP-1193 style wallet over JSON-RPC: the wallet
//! answers `eth_chainId`/`eth_accounts` and signs `eth_sendTransaction`
//! requests itself.

use std::sync::Arc;
use std::time::Duration;

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use alloy::transports::TransportError;
use async_trait::async_trait;
use tokio::time::timeout;

use crate::blockchain::types::{BlockchainError, BlockchainResult, ChainId, TransactionOutcome};

/// EIP-1193 error code for "user rejected the request".
pub const USER_REJECTED_CODE: i64 = 4001;

/// JSON-RPC error code used by nodes for reverted execution.
const EXECUTION_REVERTED_CODE: i64 = 3;

/// A wallet that can report its network and hand out a signer.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// The chain the wallet is currently attached to.
    async fn chain_id(&self) -> BlockchainResult<ChainId>;

    /// A signer bound to the wallet's currently selected account.
    async fn signer(&self) -> BlockchainResult<Arc<dyn TransactionSigner>>;
}

/// An account that can read from and submit transactions to contracts.
#[async_trait]
pub trait TransactionSigner: Send + Sync {
    /// Address of the signing account.
    fn address(&self) -> Address;

    /// Execute a read-only call and return the raw output.
    async fn call(&self, to: Address, input: Bytes) -> BlockchainResult<Bytes>;

    /// Submit a transaction and wait until the chain has accepted it.
    async fn send(&self, to: Address, input: Bytes, value: U256)
        -> BlockchainResult<TransactionOutcome>;
}

/// Wallet reached through a JSON-RPC endpoint.
#[derive(Clone)]
pub struct RpcWallet {
    provider: Arc<dyn Provider + Send + Sync>,
    endpoint: String,
    rpc_timeout: Duration,
    receipt_timeout: Duration,
}

impl RpcWallet {
    /// Connect to the wallet endpoint.
    ///
    /// No request is sent until the wallet is first used.
    pub fn connect(
        endpoint: &str,
        rpc_timeout: Duration,
        receipt_timeout: Duration,
    ) -> BlockchainResult<Self> {
        let url: url::Url = endpoint.parse().map_err(|e| {
            BlockchainError::Rpc(format!("Invalid wallet URL '{}': {}", endpoint, e))
        })?;
        let provider =
            Arc::new(ProviderBuilder::new().connect_http(url)) as Arc<dyn Provider + Send + Sync>;

        tracing::debug!(endpoint = %endpoint, "Wallet provider connected");

        Ok(Self {
            provider,
            endpoint: endpoint.to_string(),
            rpc_timeout,
            receipt_timeout,
        })
    }
}

#[async_trait]
impl WalletProvider for RpcWallet {
    async fn chain_id(&self) -> BlockchainResult<ChainId> {
        match timeout(self.rpc_timeout, self.provider.get_chain_id()).await {
            Ok(Ok(id)) => Ok(ChainId(id)),
            Ok(Err(e)) => Err(BlockchainError::Rpc(e.to_string())),
            Err(_) => Err(BlockchainError::Timeout(self.rpc_timeout.as_secs())),
        }
    }

    async fn signer(&self) -> BlockchainResult<Arc<dyn TransactionSigner>> {
        let accounts = match timeout(self.rpc_timeout, self.provider.get_accounts()).await {
            Ok(Ok(accounts)) => accounts,
            Ok(Err(e)) => return Err(classify_rpc_error(e)),
            Err(_) => return Err(BlockchainError::Timeout(self.rpc_timeout.as_secs())),
        };
        let from = accounts.first().copied().ok_or(BlockchainError::NoAccounts)?;

        Ok(Arc::new(RpcSigner {
            provider: self.provider.clone(),
            from,
            rpc_timeout: self.rpc_timeout,
            receipt_timeout: self.receipt_timeout,
        }))
    }
}

impl std::fmt::Debug for RpcWallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcWallet")
            .field("endpoint", &self.endpoint)
            .field("rpc_timeout", &self.rpc_timeout)
            .field("receipt_timeout", &self.receipt_timeout)
            .finish()
    }
}

/// Signer for one account of an [`RpcWallet`].
struct RpcSigner {
    provider: Arc<dyn Provider + Send + Sync>,
    from: Address,
    rpc_timeout: Duration,
    receipt_timeout: Duration,
}

#[async_trait]
impl TransactionSigner for RpcSigner {
    fn address(&self) -> Address {
        self.from
    }

    async fn call(&self, to: Address, input: Bytes) -> BlockchainResult<Bytes> {
        let tx = TransactionRequest::default()
            .with_from(self.from)
            .with_to(to)
            .with_input(input);

        match timeout(self.rpc_timeout, self.provider.call(tx)).await {
            Ok(Ok(output)) => Ok(output),
            Ok(Err(e)) => Err(classify_rpc_error(e)),
            Err(_) => Err(BlockchainError::Timeout(self.rpc_timeout.as_secs())),
        }
    }

    async fn send(
        &self,
        to: Address,
        input: Bytes,
        value: U256,
    ) -> BlockchainResult<TransactionOutcome> {
        let tx = TransactionRequest::default()
            .with_from(self.from)
            .with_to(to)
            .with_input(input)
            .with_value(value);

        // No timeout on the submission itself: the wallet may be waiting on
        // the user to approve the prompt.
        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(classify_rpc_error)?;
        let tx_hash = *pending.tx_hash();
        tracing::info!(tx_hash = %tx_hash, "Transaction submitted, awaiting receipt");

        let receipt = match timeout(self.receipt_timeout, pending.get_receipt()).await {
            Ok(Ok(receipt)) => receipt,
            Ok(Err(e)) => {
                return Err(BlockchainError::Unconfirmed {
                    tx_hash,
                    reason: e.to_string(),
                })
            }
            Err(_) => {
                return Err(BlockchainError::Unconfirmed {
                    tx_hash,
                    reason: format!("no receipt after {} seconds", self.receipt_timeout.as_secs()),
                })
            }
        };

        if !receipt.status() {
            return Err(BlockchainError::Reverted(format!(
                "transaction {} reverted",
                tx_hash
            )));
        }

        Ok(TransactionOutcome {
            transaction_hash: receipt.transaction_hash,
            contract_address: receipt.contract_address,
            block_number: receipt.block_number,
        })
    }
}

/// Sort a JSON-RPC failure into user rejection, revert, or plain RPC error.
fn classify_rpc_error(e: TransportError) -> BlockchainError {
    match e.as_error_resp() {
        Some(payload) => classify_error_payload(payload.code, &payload.message)
            .unwrap_or_else(|| BlockchainError::Rpc(e.to_string())),
        None => BlockchainError::Rpc(e.to_string()),
    }
}

fn classify_error_payload(code: i64, message: &str) -> Option<BlockchainError> {
    if code == USER_REJECTED_CODE {
        return Some(BlockchainError::Rejected(message.to_string()));
    }
    if code == EXECUTION_REVERTED_CODE || message.contains("revert") {
        return Some(BlockchainError::Reverted(message.to_string()));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_url() {
        let result = RpcWallet::connect("not a url", Duration::from_secs(1), Duration::from_secs(1));
        assert!(result.unwrap_err().to_string().contains("Invalid wallet URL"));
    }

    #[test]
    fn test_user_rejection_is_classified() {
        let err = classify_error_payload(4001, "User denied transaction signature");
        assert_eq!(
            err,
            Some(BlockchainError::Rejected("User denied transaction signature".into()))
        );
    }

    #[test]
    fn test_revert_is_classified() {
        let err = classify_error_payload(3, "execution reverted: insufficient value");
        assert!(matches!(err, Some(BlockchainError::Reverted(_))));

        let err = classify_error_payload(-32000, "execution reverted");
        assert!(matches!(err, Some(BlockchainError::Reverted(_))));
    }

    #[test]
    fn test_other_errors_are_unclassified() {
        assert_eq!(classify_error_payload(-32601, "method not found"), None);
    }

    #[tokio::test]
    async fn test_unreachable_wallet_fails() {
        let wallet = RpcWallet::connect(
            "http://127.0.0.1:1",
            Duration::from_secs(2),
            Duration::from_secs(2),
        )
        .unwrap();
        assert!(wallet.chain_id().await.is_err());
    }
}
