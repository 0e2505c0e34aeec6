//! Carbon-credit contract binding.

use std::sync::Arc;

use alloy::primitives::{Address, U256};
use alloy::sol;
use alloy::sol_types::SolCall;

use crate::blockchain::types::{BlockchainError, BlockchainResult, TransactionOutcome};
use crate::blockchain::wallet::TransactionSigner;

sol! {
    /// Read and purchase surface of the carbon-credit contract.
    #[derive(Debug)]
    interface ICarbonCredits {
        function creditPrice() external view returns (uint256);
        function totalSupply() external view returns (uint256);
        function carbonCreditsPerTon() external view returns (uint256);
        function purchaseCarbonCredits(uint256 tonnes) external payable;
    }
}

/// Signer-bound handle to the carbon-credit contract.
///
/// Handles are cheap and never cached: each flow binds a fresh one so a
/// wallet account switch can never leave a stale signer behind.
#[derive(Clone)]
pub struct ContractHandle {
    address: Address,
    signer: Arc<dyn TransactionSigner>,
}

impl ContractHandle {
    /// Bind a signer to the contract at `address`.
    pub fn new(address: Address, signer: Arc<dyn TransactionSigner>) -> Self {
        Self { address, signer }
    }

    /// Contract address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Account that signs for this handle.
    pub fn signer_address(&self) -> Address {
        self.signer.address()
    }

    pub async fn credit_price(&self) -> BlockchainResult<U256> {
        self.read(ICarbonCredits::creditPriceCall {}).await
    }

    pub async fn total_supply(&self) -> BlockchainResult<U256> {
        self.read(ICarbonCredits::totalSupplyCall {}).await
    }

    pub async fn carbon_credits_per_ton(&self) -> BlockchainResult<U256> {
        self.read(ICarbonCredits::carbonCreditsPerTonCall {}).await
    }

    /// Submit `purchaseCarbonCredits(tonnes)` with `value` attached.
    pub async fn purchase_carbon_credits(
        &self,
        tonnes: u64,
        value: U256,
    ) -> BlockchainResult<TransactionOutcome> {
        let call = ICarbonCredits::purchaseCarbonCreditsCall {
            tonnes: U256::from(tonnes),
        };
        self.signer
            .send(self.address, call.abi_encode().into(), value)
            .await
    }

    async fn read<C: SolCall>(&self, call: C) -> BlockchainResult<C::Return> {
        let output = self
            .signer
            .call(self.address, call.abi_encode().into())
            .await?;
        C::abi_decode_returns(&output).map_err(|e| {
            BlockchainError::Decode(format!("{}: {}", C::SIGNATURE, e))
        })
    }
}

impl std::fmt::Debug for ContractHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContractHandle")
            .field("address", &self.address)
            .field("signer", &self.signer.address())
            .finish()
    }
}
