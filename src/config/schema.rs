//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the exchange
//! client. All types derive Serde traits for deserialization from config files.

use std::collections::BTreeMap;
use std::time::Duration;

use alloy::primitives::{address, Address};
use serde::{Deserialize, Serialize};

use crate::blockchain::types::ChainId;

/// Root configuration for the exchange client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ExchangeConfig {
    /// Expected network and wallet endpoint.
    pub network: NetworkConfig,

    /// Carbon-credit contract location.
    pub contract: ContractConfig,

    /// Accepted purchase range.
    pub purchase: PurchaseConfig,

    /// Redemption SDK settings.
    pub redemption: RedemptionConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Network configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// The only chain contract calls are allowed on (44787 = Celo Alfajores).
    pub expected_chain_id: u64,

    /// JSON-RPC endpoint of the injected wallet. Unset means no wallet.
    pub wallet_rpc_url: Option<String>,

    /// Timeout for each wallet RPC request in seconds.
    pub rpc_timeout_secs: u64,

    /// How long to wait for a submitted transaction to be accepted, in seconds.
    pub receipt_timeout_secs: u64,

    /// Block explorer used for transaction links.
    pub explorer_url: String,
}

impl NetworkConfig {
    pub fn expected_chain(&self) -> ChainId {
        ChainId(self.expected_chain_id)
    }

    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_secs(self.rpc_timeout_secs)
    }

    pub fn receipt_timeout(&self) -> Duration {
        Duration::from_secs(self.receipt_timeout_secs)
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            expected_chain_id: 44787,
            wallet_rpc_url: None,
            rpc_timeout_secs: 10,
            receipt_timeout_secs: 120,
            explorer_url: "https://alfajores.celoscan.io".to_string(),
        }
    }
}

/// Carbon-credit contract configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContractConfig {
    /// Deployed contract address.
    pub address: Address,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            address: address!("0xE5738DaDd196816365dCDc92B12E329acC9bcba4"),
        }
    }
}

/// Purchase limits, enforced regardless of what the caller already checked.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PurchaseConfig {
    pub min_tonnes: u64,
    pub max_tonnes: u64,
}

impl Default for PurchaseConfig {
    fn default() -> Self {
        Self {
            min_tonnes: 1,
            max_tonnes: 1000,
        }
    }
}

/// Redemption SDK configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RedemptionConfig {
    /// Network name the SDK targets (e.g., "mumbai").
    pub network: String,

    /// When set, the wallet must be on this chain before redeeming.
    pub expected_chain_id: Option<u64>,

    /// Decimals of the redeemed token; amounts are scaled by 10^decimals.
    pub amount_decimals: u8,

    /// Redeemable token symbol → pool contract address.
    pub pools: BTreeMap<String, Address>,
}

impl Default for RedemptionConfig {
    fn default() -> Self {
        Self {
            network: "mumbai".to_string(),
            expected_chain_id: None,
            amount_decimals: 18,
            pools: BTreeMap::new(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
