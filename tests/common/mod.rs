//! In-memory wallet, signer and redemption SDK for driving the client.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use alloy::primitives::{Address, Bytes, TxHash, U256};
use alloy::sol_types::{SolCall, SolValue};
use async_trait::async_trait;

use carbon_exchange::blockchain::contract::ICarbonCredits;
use carbon_exchange::blockchain::types::{
    BlockchainError, BlockchainResult, ChainId, TransactionOutcome,
};
use carbon_exchange::blockchain::wallet::{TransactionSigner, WalletProvider};
use carbon_exchange::config::ExchangeConfig;
use carbon_exchange::redemption::{RedemptionSdk, SdkError, SdkSession};
use carbon_exchange::ExchangeClient;

pub const ALFAJORES: u64 = 44787;
pub const CONTRACT: Address = Address::new([0xc0; 20]);
pub const ACCOUNT: Address = Address::new([0xa1; 20]);

/// Contract state and behaviour served by [`FakeSigner`].
pub struct FakeSigner {
    pub credit_price: U256,
    pub total_supply: U256,
    pub carbon_credits_per_ton: U256,
    /// Selector whose read fails.
    pub failing_read: Option<[u8; 4]>,
    /// Reject every submission as if the user declined the prompt.
    pub reject_sends: AtomicBool,
    /// Broadcast every submission but never produce a receipt.
    pub unconfirmed_sends: AtomicBool,
    pub calls: AtomicU32,
    pub sends: Mutex<Vec<(Address, Bytes, U256)>>,
    next_tx: AtomicU64,
}

impl FakeSigner {
    pub fn new(credit_price: u64, total_supply: u64, carbon_credits_per_ton: u64) -> Self {
        Self {
            credit_price: U256::from(credit_price),
            total_supply: U256::from(total_supply),
            carbon_credits_per_ton: U256::from(carbon_credits_per_ton),
            failing_read: None,
            reject_sends: AtomicBool::new(false),
            unconfirmed_sends: AtomicBool::new(false),
            calls: AtomicU32::new(0),
            sends: Mutex::new(Vec::new()),
            next_tx: AtomicU64::new(1),
        }
    }

    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn sent(&self) -> Vec<(Address, Bytes, U256)> {
        self.sends.lock().unwrap().clone()
    }
}

#[async_trait]
impl TransactionSigner for FakeSigner {
    fn address(&self) -> Address {
        ACCOUNT
    }

    async fn call(&self, to: Address, input: Bytes) -> BlockchainResult<Bytes> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        assert_eq!(to, CONTRACT, "read sent to the wrong contract");

        let selector: [u8; 4] = input[..4].try_into().unwrap();
        if self.failing_read == Some(selector) {
            return Err(BlockchainError::Rpc("node unavailable".into()));
        }
        let value = if selector == ICarbonCredits::creditPriceCall::SELECTOR {
            self.credit_price
        } else if selector == ICarbonCredits::totalSupplyCall::SELECTOR {
            self.total_supply
        } else if selector == ICarbonCredits::carbonCreditsPerTonCall::SELECTOR {
            self.carbon_credits_per_ton
        } else {
            return Err(BlockchainError::Rpc("unknown selector".into()));
        };
        Ok(value.abi_encode().into())
    }

    async fn send(&self, to: Address, input: Bytes, value: U256) -> BlockchainResult<TransactionOutcome> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.sends.lock().unwrap().push((to, input, value));
        if self.reject_sends.load(Ordering::SeqCst) {
            return Err(BlockchainError::Rejected("User denied transaction signature".into()));
        }

        let n = self.next_tx.fetch_add(1, Ordering::SeqCst);
        let transaction_hash = TxHash::left_padding_from(&n.to_be_bytes());
        if self.unconfirmed_sends.load(Ordering::SeqCst) {
            return Err(BlockchainError::Unconfirmed {
                tx_hash: transaction_hash,
                reason: "connection reset while polling receipt".into(),
            });
        }
        Ok(TransactionOutcome {
            transaction_hash,
            contract_address: None,
            block_number: Some(100 + n),
        })
    }
}

/// Wallet exposing one [`FakeSigner`] on a fixed chain.
pub struct FakeWallet {
    pub chain_id: ChainId,
    pub signer: Arc<FakeSigner>,
    pub chain_id_calls: AtomicU32,
    pub signer_calls: AtomicU32,
}

impl FakeWallet {
    pub fn new(chain_id: u64, signer: FakeSigner) -> Self {
        Self {
            chain_id: ChainId(chain_id),
            signer: Arc::new(signer),
            chain_id_calls: AtomicU32::new(0),
            signer_calls: AtomicU32::new(0),
        }
    }

    /// Every wallet or contract interaction seen so far.
    pub fn total_calls(&self) -> u32 {
        self.chain_id_calls.load(Ordering::SeqCst)
            + self.signer_calls.load(Ordering::SeqCst)
            + self.signer.call_count()
    }
}

#[async_trait]
impl WalletProvider for FakeWallet {
    async fn chain_id(&self) -> BlockchainResult<ChainId> {
        self.chain_id_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.chain_id)
    }

    async fn signer(&self) -> BlockchainResult<Arc<dyn TransactionSigner>> {
        self.signer_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.signer.clone())
    }
}

/// Redemption SDK that records requests instead of touching a chain.
#[derive(Default)]
pub struct FakeSdk {
    pub requests: Mutex<Vec<(String, String, U256)>>,
    pub failure: Option<SdkError>,
}

impl FakeSdk {
    pub fn failing(error: SdkError) -> Self {
        Self {
            failure: Some(error),
            ..Default::default()
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl RedemptionSdk for FakeSdk {
    async fn redeem_auto(
        &self,
        session: &SdkSession,
        token_id: &str,
        amount: U256,
    ) -> Result<TransactionOutcome, SdkError> {
        self.requests.lock().unwrap().push((
            session.network().to_string(),
            token_id.to_string(),
            amount,
        ));
        if let Some(e) = &self.failure {
            return Err(e.clone());
        }
        Ok(TransactionOutcome {
            transaction_hash: TxHash::repeat_byte(0xee),
            contract_address: None,
            block_number: Some(7),
        })
    }
}

pub fn test_config() -> ExchangeConfig {
    let mut config = ExchangeConfig::default();
    config.contract.address = CONTRACT;
    config
}

/// Client wired to `wallet` and `sdk`.
pub fn client_with(wallet: Arc<FakeWallet>, sdk: Arc<FakeSdk>) -> ExchangeClient {
    ExchangeClient::new(test_config())
        .with_wallet(wallet)
        .with_sdk(sdk)
}
