//! Carbon credit exchange client.
//!
//! Buys and redeems tokenized carbon credits through an injected wallet:
//! validates the wallet's network, reads pricing from the carbon-credit
//! contract, submits funded purchases, and drives redemptions through a
//! redemption SDK.
//!
//! # Architecture Overview
//!
//! ```text
//!   caller (UI / CLI)
//!       │
//!       ▼
//!   ExchangeClient ──▶ blockchain::session ──▶ blockchain::network
//!       │                    │
//!       │                    ▼
//!       │              ContractHandle ──▶ wallet signer ──▶ chain
//!       │
//!       ├──▶ exchange::pricing
//!       ├──▶ exchange::purchase
//!       └──▶ redemption::orchestrator ──▶ RedemptionSdk
//!       │
//!       ▼
//!   report::Outcome (success data or typed failure)
//! ```

// Core
pub mod blockchain;
pub mod exchange;
pub mod redemption;

// Cross-cutting concerns
pub mod config;
pub mod error;
pub mod observability;
pub mod report;

pub use config::ExchangeConfig;
pub use error::{ErrorKind, ExchangeError, ExchangeResult};
pub use exchange::ExchangeClient;
pub use report::{report, Outcome};
