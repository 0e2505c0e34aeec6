//! Contract session establishment.
//!
//! # Steps
//! ```text
//! injected wallet (absent → WalletUnavailable)
//!     → chain id (provider failure → ProviderError)
//!     → network.rs (wrong chain → NetworkMismatch)
//!     → signer (provider failure → ProviderError)
//!     → ContractHandle { address, ABI, signer }
//! ```

use std::sync::Arc;

use alloy::primitives::Address;

use crate::blockchain::contract::ContractHandle;
use crate::blockchain::network::validate_network;
use crate::blockchain::types::{ChainId, NetworkContext};
use crate::blockchain::wallet::{TransactionSigner, WalletProvider};
use crate::error::{ExchangeError, ExchangeResult};

/// Read the wallet's network and fail unless it is `expected`.
pub async fn check_wallet_network(
    wallet: &dyn WalletProvider,
    expected: ChainId,
) -> ExchangeResult<NetworkContext> {
    let chain_id = wallet
        .chain_id()
        .await
        .map_err(|e| ExchangeError::Provider(e.to_string()))?;
    let context = NetworkContext { chain_id };
    validate_network(&context, expected)?;
    Ok(context)
}

/// Obtain a signer from the wallet.
pub async fn wallet_signer(wallet: &dyn WalletProvider) -> ExchangeResult<Arc<dyn TransactionSigner>> {
    wallet
        .signer()
        .await
        .map_err(|e| ExchangeError::Provider(e.to_string()))
}

/// Open a fresh signer-bound handle to the contract at `contract_address`.
pub async fn open_session(
    wallet: Option<&Arc<dyn WalletProvider>>,
    expected: ChainId,
    contract_address: Address,
) -> ExchangeResult<ContractHandle> {
    let wallet = wallet.ok_or(ExchangeError::WalletUnavailable)?;

    check_wallet_network(wallet.as_ref(), expected).await?;
    let signer = wallet_signer(wallet.as_ref()).await?;

    tracing::debug!(
        contract = %contract_address,
        account = %signer.address(),
        chain_id = %expected,
        "Contract session opened"
    );

    Ok(ContractHandle::new(contract_address, signer))
}
