//! Redemption flow: validate, establish the SDK session, convert the amount,
//! delegate to the SDK.

use std::sync::Arc;

use alloy::primitives::utils::parse_units;
use alloy::primitives::U256;
use serde::Serialize;

use crate::blockchain::network::validate_network;
use crate::blockchain::session::wallet_signer;
use crate::blockchain::types::{ChainId, NetworkContext, TransactionOutcome};
use crate::blockchain::wallet::WalletProvider;
use crate::config::RedemptionConfig;
use crate::error::{ExchangeError, ExchangeResult};
use crate::redemption::catalogue::Catalogue;
use crate::redemption::sdk::{RedemptionSdk, SdkSession};

/// A validated redemption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedemptionRequest {
    pub token_id: String,
    /// Amount as entered.
    pub amount: String,
    /// Amount in the token's smallest unit.
    pub amount_units: U256,
}

/// An accepted redemption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedemptionReceipt {
    #[serde(flatten)]
    pub request: RedemptionRequest,
    #[serde(flatten)]
    pub outcome: TransactionOutcome,
}

/// Check the token against an optional catalogue.
pub fn validate_token(token_id: &str, catalogue: Option<&Catalogue>) -> ExchangeResult<String> {
    let token_id = token_id.trim();
    if token_id.is_empty() {
        return Err(ExchangeError::InvalidToken("no token selected".to_string()));
    }
    if let Some(catalogue) = catalogue {
        if !catalogue.contains(token_id) {
            return Err(ExchangeError::InvalidToken(format!(
                "'{}' is not in the token catalogue",
                token_id
            )));
        }
    }
    Ok(token_id.to_string())
}

/// Convert a positive decimal amount to smallest units with exact
/// fixed-point arithmetic.
pub fn parse_amount(amount: &str, decimals: u8) -> ExchangeResult<U256> {
    let amount = amount.trim();
    if amount.starts_with('-') {
        return Err(ExchangeError::InvalidAmount(format!(
            "amount must be positive, got '{}'",
            amount
        )));
    }
    if let Some((_, fraction)) = amount.split_once('.') {
        if fraction.trim_end_matches('0').len() > usize::from(decimals) {
            return Err(ExchangeError::InvalidAmount(format!(
                "'{}' has more than {} decimal places",
                amount, decimals
            )));
        }
    }
    let units: U256 = parse_units(amount, decimals)
        .map_err(|e| {
            ExchangeError::InvalidAmount(format!("'{}' is not a decimal amount: {}", amount, e))
        })?
        .into();
    if units.is_zero() {
        return Err(ExchangeError::InvalidAmount(format!(
            "amount must be greater than 0, got '{}'",
            amount
        )));
    }
    Ok(units)
}

/// Validate inputs ahead of any wallet or SDK interaction.
pub fn prepare_redemption(
    token_id: &str,
    amount: &str,
    config: &RedemptionConfig,
    catalogue: Option<&Catalogue>,
) -> ExchangeResult<RedemptionRequest> {
    let token_id = validate_token(token_id, catalogue)?;
    let amount_units = parse_amount(amount, config.amount_decimals)?;
    Ok(RedemptionRequest {
        token_id,
        amount: amount.trim().to_string(),
        amount_units,
    })
}

/// Open a provider/signer session with the SDK's network settings.
pub async fn establish_sdk_session(
    wallet: Option<&Arc<dyn WalletProvider>>,
    config: &RedemptionConfig,
) -> ExchangeResult<SdkSession> {
    let wallet = wallet.ok_or(ExchangeError::WalletUnavailable)?;

    let chain_id = wallet
        .chain_id()
        .await
        .map_err(|e| ExchangeError::Provider(e.to_string()))?;
    if let Some(expected) = config.expected_chain_id {
        validate_network(&NetworkContext { chain_id }, ChainId(expected))?;
    }
    let signer = wallet_signer(wallet.as_ref()).await?;

    Ok(SdkSession::new(config.network.clone(), chain_id, signer))
}

/// Hand a validated request to the SDK.
pub async fn submit_redemption(
    sdk: &dyn RedemptionSdk,
    session: &SdkSession,
    request: RedemptionRequest,
) -> ExchangeResult<RedemptionReceipt> {
    let outcome = sdk
        .redeem_auto(session, &request.token_id, request.amount_units)
        .await
        .map_err(|e| ExchangeError::RedemptionFailed(e.to_string()))?;

    tracing::info!(
        tx_hash = %outcome.transaction_hash,
        token = %request.token_id,
        "Redemption accepted"
    );
    Ok(RedemptionReceipt { request, outcome })
}
