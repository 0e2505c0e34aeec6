//! Carbon-credit purchases.
//!
//! The attached value is always `tonnes * creditPrice` using a price read
//! taken immediately before submission. Purchases are not idempotent: every
//! call submits a new transaction, and failures are never retried.

use alloy::primitives::U256;
use serde::Serialize;

use crate::blockchain::contract::ContractHandle;
use crate::blockchain::types::{BlockchainError, TransactionOutcome};
use crate::config::PurchaseConfig;
use crate::error::{ExchangeError, ExchangeResult};

/// A validated purchase, priced and ready to submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRequest {
    pub tonnes: u64,
    /// Value attached to the transaction, in the chain's smallest unit.
    pub expected_cost: U256,
}

/// An accepted purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseReceipt {
    #[serde(flatten)]
    pub request: PurchaseRequest,
    #[serde(flatten)]
    pub outcome: TransactionOutcome,
}

/// Check that `tonnes` is within the configured range.
pub fn validate_tonnes(tonnes: i64, limits: &PurchaseConfig) -> ExchangeResult<u64> {
    let accepted = u64::try_from(tonnes)
        .ok()
        .filter(|t| (limits.min_tonnes..=limits.max_tonnes).contains(t));

    accepted.ok_or_else(|| {
        ExchangeError::InvalidAmount(format!(
            "tonnes must be a whole number between {} and {}, got {}",
            limits.min_tonnes, limits.max_tonnes, tonnes
        ))
    })
}

/// Parse user-entered tonnage text. Anything but a whole number is rejected.
pub fn parse_tonnes(raw: &str, limits: &PurchaseConfig) -> ExchangeResult<u64> {
    let raw = raw.trim();
    let tonnes = raw.parse::<i64>().map_err(|_| {
        ExchangeError::InvalidAmount(format!("tonnes must be a whole number, got '{}'", raw))
    })?;
    validate_tonnes(tonnes, limits)
}

/// Price `tonnes` at `credit_price`.
pub fn price_purchase(tonnes: u64, credit_price: U256) -> ExchangeResult<PurchaseRequest> {
    let expected_cost = credit_price.checked_mul(U256::from(tonnes)).ok_or_else(|| {
        ExchangeError::InvalidAmount(format!(
            "purchase of {} tonnes at price {} overflows",
            tonnes, credit_price
        ))
    })?;
    Ok(PurchaseRequest {
        tonnes,
        expected_cost,
    })
}

/// Read the live price, then submit the funded purchase.
pub async fn submit_purchase(handle: &ContractHandle, tonnes: u64) -> ExchangeResult<PurchaseReceipt> {
    let credit_price = handle
        .credit_price()
        .await
        .map_err(|e| ExchangeError::Read(e.to_string()))?;
    let request = price_purchase(tonnes, credit_price)?;

    tracing::info!(
        tonnes = request.tonnes,
        credit_price = %credit_price,
        value = %request.expected_cost,
        "Submitting purchase"
    );

    let outcome = handle
        .purchase_carbon_credits(request.tonnes, request.expected_cost)
        .await
        .map_err(submission_error)?;

    tracing::info!(tx_hash = %outcome.transaction_hash, "Purchase accepted");
    Ok(PurchaseReceipt { request, outcome })
}

/// Map a submission failure.
///
/// Only a definite refusal is a rejection. A broadcast
/// transaction without a receipt may still land, so it is reported as unknown
/// and must not be resubmitted blindly.
fn submission_error(e: BlockchainError) -> ExchangeError {
    match e {
        BlockchainError::Rejected(reason) | BlockchainError::Reverted(reason) => {
            ExchangeError::TransactionRejected(reason)
        }
        // Refused by the wallet or node before broadcast.
        BlockchainError::Rpc(reason) => ExchangeError::TransactionRejected(reason),
        e @ (BlockchainError::Unconfirmed { .. }
        | BlockchainError::Timeout(_)
        | BlockchainError::NoAccounts
        | BlockchainError::Decode(_)) => ExchangeError::Unknown(e.to_string()),
    }
}
