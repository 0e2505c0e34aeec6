//! Exchange client: the entry point for every user-initiated action.
//!
//! # Flow
//! ```text
//! action → input validation (no chain calls)
//!        → session (wallet → network check → signer → handle)
//!        → pricing / purchase / redemption
//!        → ExchangeResult (see report.rs for the caller-facing shape)
//! ```
//!
//! Nothing is shared between calls: each operation opens its own session, so
//! a wallet account switch between calls is always picked up.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use alloy::primitives::U256;
use serde::Serialize;
use tracing::Instrument;
use uuid::Uuid;

use crate::blockchain::contract::ContractHandle;
use crate::blockchain::session::open_session;
use crate::blockchain::types::ChainId;
use crate::blockchain::wallet::{RpcWallet, WalletProvider};
use crate::config::ExchangeConfig;
use crate::error::{ExchangeError, ExchangeResult};
use crate::exchange::pricing::{read_pricing_snapshot, PricingSnapshot};
use crate::exchange::purchase::{parse_tonnes, submit_purchase, validate_tonnes, PurchaseReceipt};
use crate::observability::metrics;
use crate::redemption::catalogue::Catalogue;
use crate::redemption::orchestrator::{
    establish_sdk_session, prepare_redemption, submit_redemption, RedemptionReceipt,
};
use crate::redemption::pool::PoolRedeemer;
use crate::redemption::sdk::RedemptionSdk;

/// Wallet network as seen by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkStatus {
    pub wallet_chain_id: ChainId,
    pub expected_chain_id: ChainId,
    pub matches: bool,
}

/// Client for buying and redeeming carbon credits through an injected wallet.
#[derive(Clone)]
pub struct ExchangeClient {
    config: Arc<ExchangeConfig>,
    wallet: Option<Arc<dyn WalletProvider>>,
    sdk: Arc<dyn RedemptionSdk>,
    catalogue: Option<Arc<Catalogue>>,
}

impl ExchangeClient {
    /// Create a client without a wallet, redeeming through the configured pools.
    pub fn new(config: ExchangeConfig) -> Self {
        let sdk = Arc::new(PoolRedeemer::new(config.redemption.pools.clone()));
        Self {
            config: Arc::new(config),
            wallet: None,
            sdk,
            catalogue: None,
        }
    }

    /// Create a client, connecting to the wallet endpoint when one is configured.
    pub fn from_config(config: ExchangeConfig) -> ExchangeResult<Self> {
        let wallet = match &config.network.wallet_rpc_url {
            Some(url) => Some(
                RpcWallet::connect(
                    url,
                    config.network.rpc_timeout(),
                    config.network.receipt_timeout(),
                )
                .map_err(|e| ExchangeError::Provider(e.to_string()))?,
            ),
            None => None,
        };

        let client = Self::new(config);
        Ok(match wallet {
            Some(wallet) => client.with_wallet(Arc::new(wallet)),
            None => client,
        })
    }

    pub fn with_wallet(mut self, wallet: Arc<dyn WalletProvider>) -> Self {
        self.wallet = Some(wallet);
        self
    }

    pub fn with_sdk(mut self, sdk: Arc<dyn RedemptionSdk>) -> Self {
        self.sdk = sdk;
        self
    }

    /// Restrict redemption to tokens in `catalogue`.
    pub fn with_catalogue(mut self, catalogue: Catalogue) -> Self {
        self.catalogue = Some(Arc::new(catalogue));
        self
    }

    pub fn config(&self) -> &ExchangeConfig {
        &self.config
    }

    /// Report the wallet's network without failing on a mismatch.
    pub async fn network_status(&self) -> ExchangeResult<NetworkStatus> {
        self.run("network_status", async {
            let wallet = self.wallet.as_ref().ok_or(ExchangeError::WalletUnavailable)?;
            let wallet_chain_id = wallet
                .chain_id()
                .await
                .map_err(|e| ExchangeError::Provider(e.to_string()))?;
            let expected_chain_id = self.config.network.expected_chain();
            Ok(NetworkStatus {
                wallet_chain_id,
                expected_chain_id,
                matches: wallet_chain_id == expected_chain_id,
            })
        })
        .await
    }

    /// Open a fresh contract session.
    pub async fn open_session(&self) -> ExchangeResult<ContractHandle> {
        open_session(
            self.wallet.as_ref(),
            self.config.network.expected_chain(),
            self.config.contract.address,
        )
        .await
    }

    /// Read price, supply and credits-per-ton together and derive the footprint.
    pub async fn pricing_snapshot(&self) -> ExchangeResult<PricingSnapshot> {
        self.run("pricing_snapshot", async {
            let handle = self.open_session().await?;
            read_pricing_snapshot(&handle).await
        })
        .await
    }

    /// Current price per credit.
    pub async fn credit_price(&self) -> ExchangeResult<U256> {
        self.run("credit_price", async {
            let handle = self.open_session().await?;
            handle
                .credit_price()
                .await
                .map_err(|e| ExchangeError::Read(e.to_string()))
        })
        .await
    }

    /// Credits that make up one tonne.
    pub async fn carbon_credits_per_ton(&self) -> ExchangeResult<U256> {
        self.run("carbon_credits_per_ton", async {
            let handle = self.open_session().await?;
            handle
                .carbon_credits_per_ton()
                .await
                .map_err(|e| ExchangeError::Read(e.to_string()))
        })
        .await
    }

    /// Footprint figure as reported to users: the cost of all credits issued.
    pub async fn carbon_footprint(&self) -> ExchangeResult<f64> {
        self.run("carbon_footprint", async {
            let handle = self.open_session().await?;
            Ok(read_pricing_snapshot(&handle).await?.footprint_cost)
        })
        .await
    }

    /// Buy `tonnes` of credits at the live price.
    ///
    /// Not idempotent: every call that passes validation submits a new
    /// transaction.
    pub async fn purchase(&self, tonnes: i64) -> ExchangeResult<PurchaseReceipt> {
        self.run("purchase", async {
            let tonnes = validate_tonnes(tonnes, &self.config.purchase)?;
            self.purchase_validated(tonnes).await
        })
        .await
    }

    /// Buy credits from user-entered tonnage text.
    pub async fn purchase_input(&self, raw: &str) -> ExchangeResult<PurchaseReceipt> {
        self.run("purchase", async {
            let tonnes = parse_tonnes(raw, &self.config.purchase)?;
            self.purchase_validated(tonnes).await
        })
        .await
    }

    async fn purchase_validated(&self, tonnes: u64) -> ExchangeResult<PurchaseReceipt> {
        tracing::debug!(tonnes, "Purchase validated");
        let handle = self.open_session().await?;
        submit_purchase(&handle, tonnes).await
    }

    /// Redeem `amount` (decimal text) of `token_id` through the redemption SDK.
    pub async fn redeem(&self, token_id: &str, amount: &str) -> ExchangeResult<RedemptionReceipt> {
        self.run("redeem", async {
            let request = prepare_redemption(
                token_id,
                amount,
                &self.config.redemption,
                self.catalogue.as_deref(),
            )?;
            let session =
                establish_sdk_session(self.wallet.as_ref(), &self.config.redemption).await?;

            tracing::debug!(
                token = %request.token_id,
                amount_units = %request.amount_units,
                network = session.network(),
                "Redemption validated"
            );
            submit_redemption(self.sdk.as_ref(), &session, request).await
        })
        .await
    }

    /// Run one operation inside its own span and record its outcome.
    async fn run<T, F>(&self, operation: &'static str, fut: F) -> ExchangeResult<T>
    where
        F: Future<Output = ExchangeResult<T>>,
    {
        let flow_id = Uuid::new_v4();
        let span = tracing::info_span!("exchange", operation, %flow_id);
        let started = Instant::now();

        let result = fut.instrument(span.clone()).await;

        span.in_scope(|| match &result {
            Ok(_) => tracing::debug!("Operation succeeded"),
            Err(e) if e.is_validation() => {
                tracing::info!(error = %e, kind = e.kind().as_str(), "Operation refused")
            }
            Err(e) => tracing::warn!(error = %e, kind = e.kind().as_str(), "Operation failed"),
        });
        metrics::record_operation(operation, result.as_ref().map(|_| ()), started.elapsed());
        result
    }
}

impl std::fmt::Debug for ExchangeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExchangeClient")
            .field("expected_chain_id", &self.config.network.expected_chain_id)
            .field("contract", &self.config.contract.address)
            .field("wallet", &self.wallet.is_some())
            .field("catalogue", &self.catalogue.as_ref().map(|c| c.len()))
            .finish()
    }
}
