//! Network validation.
//!
//! Contract calls are only allowed once the wallet reports exactly the
//! configured chain. There is no fallback: any other chain fails closed.

use crate::blockchain::types::{ChainId, NetworkContext};
use crate::error::{ExchangeError, ExchangeResult};

/// Check that the wallet's network is the expected one.
pub fn validate_network(context: &NetworkContext, expected: ChainId) -> ExchangeResult<()> {
    if context.chain_id != expected {
        tracing::warn!(
            expected = %expected,
            actual = %context.chain_id,
            "Wallet is connected to the wrong network"
        );
        return Err(ExchangeError::NetworkMismatch {
            expected,
            actual: context.chain_id,
        });
    }
    Ok(())
}
