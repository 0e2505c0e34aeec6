//! Exchange operations.
//!
//! # Data Flow
//! ```text
//! ExchangeClient (client.rs)
//!     → pricing.rs (three reads → PricingSnapshot)
//!     → purchase.rs (validate → live price → funded purchase)
//!     → redemption::orchestrator (validate → SDK session → redeemAuto)
//! ```

pub mod client;
pub mod pricing;
pub mod purchase;

pub use client::{ExchangeClient, NetworkStatus};
pub use pricing::PricingSnapshot;
pub use purchase::{PurchaseReceipt, PurchaseRequest};
