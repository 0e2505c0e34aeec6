//! Pricing and footprint figures derived from contract state.
//!
//! The three reads have no atomicity guarantee on chain. They run
//! concurrently and the snapshot is all-or-nothing: if any read fails, no
//! figures are produced.

use alloy::primitives::U256;
use serde::Serialize;

use crate::blockchain::contract::ContractHandle;
use crate::error::{ExchangeError, ExchangeResult};

/// Raw contract reads plus the figures derived from them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingSnapshot {
    pub credit_price: U256,
    pub carbon_credits_per_ton: U256,
    pub total_supply: U256,
    /// `total_supply / carbon_credits_per_ton`.
    pub footprint_tonnes: f64,
    /// `footprint_tonnes * credit_price`, reported as the carbon footprint.
    pub footprint_cost: f64,
}

impl PricingSnapshot {
    /// Derive the footprint figures from raw reads.
    pub fn from_reads(
        credit_price: U256,
        carbon_credits_per_ton: U256,
        total_supply: U256,
    ) -> ExchangeResult<Self> {
        if carbon_credits_per_ton.is_zero() {
            return Err(ExchangeError::DivisionByZero("carbonCreditsPerTon"));
        }

        let footprint_tonnes = f64::from(total_supply) / f64::from(carbon_credits_per_ton);
        let footprint_cost = footprint_tonnes * f64::from(credit_price);

        Ok(Self {
            credit_price,
            carbon_credits_per_ton,
            total_supply,
            footprint_tonnes,
            footprint_cost,
        })
    }
}

/// Read all three values and derive the snapshot.
pub async fn read_pricing_snapshot(handle: &ContractHandle) -> ExchangeResult<PricingSnapshot> {
    let (credit_price, total_supply, carbon_credits_per_ton) = tokio::try_join!(
        handle.credit_price(),
        handle.total_supply(),
        handle.carbon_credits_per_ton(),
    )
    .map_err(|e| ExchangeError::Read(e.to_string()))?;

    tracing::debug!(
        credit_price = %credit_price,
        total_supply = %total_supply,
        carbon_credits_per_ton = %carbon_credits_per_ton,
        "Pricing reads complete"
    );

    PricingSnapshot::from_reads(credit_price, carbon_credits_per_ton, total_supply)
}
