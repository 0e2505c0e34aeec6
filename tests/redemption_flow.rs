//! Redemption flow against an in-memory wallet and SDK.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use alloy::primitives::U256;

use carbon_exchange::redemption::{Catalogue, SdkError};
use carbon_exchange::report::report;
use carbon_exchange::{ErrorKind, ExchangeClient, ExchangeError};

mod common;
use common::{client_with, test_config, FakeSdk, FakeSigner, FakeWallet, ALFAJORES};

fn wallet() -> Arc<FakeWallet> {
    Arc::new(FakeWallet::new(ALFAJORES, FakeSigner::new(5, 1000, 10)))
}

#[tokio::test]
async fn test_empty_token_never_reaches_sdk() {
    let wallet = wallet();
    let sdk = Arc::new(FakeSdk::default());
    let client = client_with(wallet.clone(), sdk.clone());

    let outcome = report("redeem", client.redeem("", "5").await);
    assert_eq!(outcome.failure().unwrap().kind, ErrorKind::InvalidToken);
    assert_eq!(sdk.request_count(), 0);
    assert_eq!(wallet.total_calls(), 0);
}

#[tokio::test]
async fn test_non_positive_amount() {
    let sdk = Arc::new(FakeSdk::default());
    let client = client_with(wallet(), sdk.clone());

    for amount in ["0", "-2", "abc"] {
        let err = client.redeem("NCT", amount).await.unwrap_err();
        assert!(matches!(err, ExchangeError::InvalidAmount(_)), "amount = {}", amount);
    }
    assert_eq!(sdk.request_count(), 0);
}

#[tokio::test]
async fn test_redeem_converts_amount_exactly() {
    let wallet = wallet();
    let sdk = Arc::new(FakeSdk::default());
    let client = client_with(wallet.clone(), sdk.clone());

    let receipt = client.redeem("NCT", "0.3").await.unwrap();
    assert_eq!(receipt.outcome.block_number, Some(7));

    let requests = sdk.requests.lock().unwrap();
    let (network, token, amount) = &requests[0];
    assert_eq!(network, "mumbai");
    assert_eq!(token, "NCT");
    assert_eq!(*amount, U256::from(300_000_000_000_000_000u128));
    assert_eq!(wallet.signer_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_sdk_failure_is_redemption_failed() {
    let sdk = Arc::new(FakeSdk::failing(SdkError::Reverted("no TCO2 left".into())));
    let client = client_with(wallet(), sdk.clone());

    let err = client.redeem("NCT", "1").await.unwrap_err();
    assert_eq!(err, ExchangeError::RedemptionFailed("reverted: no TCO2 left".into()));

    // No automatic retry.
    assert_eq!(sdk.request_count(), 1);
}

#[tokio::test]
async fn test_catalogue_restricts_tokens() {
    let sdk = Arc::new(FakeSdk::default());
    let catalogue = Catalogue::from_json(r#"{"tco2Tokens": [{"symbol": "TCO2-VCS-439-2008"}]}"#).unwrap();
    let client = client_with(wallet(), sdk.clone()).with_catalogue(catalogue);

    let err = client.redeem("NCT", "1").await.unwrap_err();
    assert!(matches!(err, ExchangeError::InvalidToken(_)));

    client.redeem("TCO2-VCS-439-2008", "1").await.unwrap();
    assert_eq!(sdk.request_count(), 1);
}

#[tokio::test]
async fn test_redemption_network_check() {
    let mut config = test_config();
    config.redemption.expected_chain_id = Some(80001);
    let sdk = Arc::new(FakeSdk::default());
    let client = ExchangeClient::new(config)
        .with_wallet(wallet())
        .with_sdk(sdk.clone());

    let err = client.redeem("NCT", "1").await.unwrap_err();
    assert!(matches!(err, ExchangeError::NetworkMismatch { .. }));
    assert_eq!(sdk.request_count(), 0);
}

#[tokio::test]
async fn test_amount_beyond_token_precision_is_refused() {
    let sdk = Arc::new(FakeSdk::default());
    let client = client_with(wallet(), sdk.clone());

    let err = client.redeem("NCT", "1.0000000000000000001").await.unwrap_err();
    assert!(matches!(err, ExchangeError::InvalidAmount(_)));
    assert!(err.to_string().contains("more than 18 decimal places"));
    assert_eq!(sdk.request_count(), 0);
}
