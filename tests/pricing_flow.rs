//! Pricing snapshot and single reads against an in-memory wallet.

use std::sync::Arc;

use alloy::primitives::U256;
use alloy::sol_types::SolCall;

use carbon_exchange::blockchain::contract::ICarbonCredits;
use carbon_exchange::report::report;
use carbon_exchange::{ErrorKind, ExchangeError};

mod common;
use common::{client_with, FakeSdk, FakeSigner, FakeWallet, ALFAJORES};

#[tokio::test]
async fn test_snapshot_derives_footprint() {
    let wallet = Arc::new(FakeWallet::new(ALFAJORES, FakeSigner::new(5, 1000, 10)));
    let client = client_with(wallet, Arc::new(FakeSdk::default()));

    let snapshot = client.pricing_snapshot().await.unwrap();
    assert_eq!(snapshot.credit_price, U256::from(5));
    assert_eq!(snapshot.total_supply, U256::from(1000));
    assert_eq!(snapshot.carbon_credits_per_ton, U256::from(10));
    assert_eq!(snapshot.footprint_tonnes, 100.0);
    assert_eq!(snapshot.footprint_cost, 500.0);

    assert_eq!(client.carbon_footprint().await.unwrap(), 500.0);
}

#[tokio::test]
async fn test_zero_credits_per_ton() {
    let wallet = Arc::new(FakeWallet::new(ALFAJORES, FakeSigner::new(5, 1000, 0)));
    let client = client_with(wallet, Arc::new(FakeSdk::default()));

    let outcome = report("pricing_snapshot", client.pricing_snapshot().await);
    assert_eq!(outcome.failure().unwrap().kind, ErrorKind::DivisionByZero);
    assert!(outcome.data().is_none());
}

#[tokio::test]
async fn test_any_failed_read_aborts_snapshot() {
    let selectors = [
        ICarbonCredits::creditPriceCall::SELECTOR,
        ICarbonCredits::totalSupplyCall::SELECTOR,
        ICarbonCredits::carbonCreditsPerTonCall::SELECTOR,
    ];
    for selector in selectors {
        let mut signer = FakeSigner::new(5, 1000, 10);
        signer.failing_read = Some(selector);
        let wallet = Arc::new(FakeWallet::new(ALFAJORES, signer));
        let client = client_with(wallet, Arc::new(FakeSdk::default()));

        let err = client.pricing_snapshot().await.unwrap_err();
        assert!(matches!(err, ExchangeError::Read(_)), "selector = {:?}", selector);
    }
}

#[tokio::test]
async fn test_single_reads() {
    let wallet = Arc::new(FakeWallet::new(ALFAJORES, FakeSigner::new(5, 1000, 10)));
    let client = client_with(wallet.clone(), Arc::new(FakeSdk::default()));

    assert_eq!(client.credit_price().await.unwrap(), U256::from(5));
    assert_eq!(client.carbon_credits_per_ton().await.unwrap(), U256::from(10));
    assert_eq!(wallet.signer.call_count(), 2);
}

#[tokio::test]
async fn test_network_status() {
    let wallet = Arc::new(FakeWallet::new(80001, FakeSigner::new(5, 1000, 10)));
    let client = client_with(wallet.clone(), Arc::new(FakeSdk::default()));

    let status = client.network_status().await.unwrap();
    assert!(!status.matches);
    assert_eq!(status.wallet_chain_id.0, 80001);

    let err = client.credit_price().await.unwrap_err();
    assert!(matches!(err, ExchangeError::NetworkMismatch { .. }));
    assert_eq!(wallet.signer.call_count(), 0);
}
