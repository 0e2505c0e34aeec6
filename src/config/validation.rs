//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, tonnage bounds ordered)
//! - Reject addresses and chain ids that can never be right (zero)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ExchangeConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is handed to the client

use std::fmt;

use crate::config::schema::ExchangeConfig;

/// Largest decimals value whose 10^decimals still fits in a U256.
const MAX_AMOUNT_DECIMALS: u8 = 77;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check the configuration for semantic errors.
pub fn validate_config(config: &ExchangeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let network = &config.network;
    if network.expected_chain_id == 0 {
        errors.push(ValidationError::new("network.expected_chain_id", "must be non-zero"));
    }
    if let Some(url) = &network.wallet_rpc_url {
        if let Err(e) = url.parse::<url::Url>() {
            errors.push(ValidationError::new(
                "network.wallet_rpc_url",
                format!("invalid URL '{}': {}", url, e),
            ));
        }
    }
    if network.rpc_timeout_secs == 0 {
        errors.push(ValidationError::new("network.rpc_timeout_secs", "must be greater than 0"));
    }
    if network.receipt_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "network.receipt_timeout_secs",
            "must be greater than 0",
        ));
    }

    if config.contract.address.is_zero() {
        errors.push(ValidationError::new("contract.address", "must not be the zero address"));
    }

    let purchase = &config.purchase;
    if purchase.min_tonnes == 0 {
        errors.push(ValidationError::new("purchase.min_tonnes", "must be at least 1"));
    }
    if purchase.min_tonnes > purchase.max_tonnes {
        errors.push(ValidationError::new(
            "purchase.max_tonnes",
            format!(
                "must not be below min_tonnes ({} < {})",
                purchase.max_tonnes, purchase.min_tonnes
            ),
        ));
    }

    let redemption = &config.redemption;
    if redemption.network.trim().is_empty() {
        errors.push(ValidationError::new("redemption.network", "must not be empty"));
    }
    if redemption.expected_chain_id == Some(0) {
        errors.push(ValidationError::new("redemption.expected_chain_id", "must be non-zero"));
    }
    if redemption.amount_decimals > MAX_AMOUNT_DECIMALS {
        errors.push(ValidationError::new(
            "redemption.amount_decimals",
            format!("must be at most {}", MAX_AMOUNT_DECIMALS),
        ));
    }
    for (symbol, pool) in &redemption.pools {
        if symbol.trim().is_empty() {
            errors.push(ValidationError::new("redemption.pools", "token symbol must not be empty"));
        }
        if pool.is_zero() {
            errors.push(ValidationError::new(
                format!("redemption.pools.{}", symbol),
                "must not be the zero address",
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
