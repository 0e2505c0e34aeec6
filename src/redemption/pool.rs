//! Pool-contract redemption.
//!
//! Redeemable tokens are pool tokens; the pool contract's own `redeemAuto`
//! picks which underlying credits are retired. This SDK only resolves the
//! pool for a symbol and submits the call through the session signer.

use std::collections::BTreeMap;

use alloy::primitives::{Address, U256};
use alloy::sol;
use alloy::sol_types::SolCall;
use async_trait::async_trait;

use crate::blockchain::types::{BlockchainError, TransactionOutcome};
use crate::redemption::sdk::{RedemptionSdk, SdkError, SdkSession};

sol! {
    /// Automatic redemption entry point of a carbon pool token.
    interface ICarbonPool {
        function redeemAuto(uint256 amount) external returns (address[] memory tco2s, uint256[] memory amounts);
    }
}

/// Redemption SDK backed by pool contracts.
#[derive(Debug, Clone, Default)]
pub struct PoolRedeemer {
    pools: BTreeMap<String, Address>,
}

impl PoolRedeemer {
    pub fn new(pools: BTreeMap<String, Address>) -> Self {
        Self { pools }
    }

    /// Pool address for a token symbol, ignoring ASCII case.
    pub fn pool_for(&self, token_id: &str) -> Option<Address> {
        self.pools
            .iter()
            .find(|(symbol, _)| symbol.eq_ignore_ascii_case(token_id))
            .map(|(_, pool)| *pool)
    }
}

#[async_trait]
impl RedemptionSdk for PoolRedeemer {
    async fn redeem_auto(
        &self,
        session: &SdkSession,
        token_id: &str,
        amount: U256,
    ) -> Result<TransactionOutcome, SdkError> {
        let pool = self
            .pool_for(token_id)
            .ok_or_else(|| SdkError::UnsupportedToken(token_id.to_string()))?;

        tracing::info!(
            network = session.network(),
            token = token_id,
            pool = %pool,
            amount = %amount,
            "Submitting automatic redemption"
        );

        let call = ICarbonPool::redeemAutoCall { amount };
        session
            .signer()
            .send(pool, call.abi_encode().into(), U256::ZERO)
            .await
            .map_err(|e| match e {
                BlockchainError::Rejected(reason) => SdkError::Rejected(reason),
                BlockchainError::Reverted(reason) => SdkError::Reverted(reason),
                other => SdkError::Transport(other.to_string()),
            })
    }
}
