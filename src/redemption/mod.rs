//! Redemption subsystem.
//!
//! # Data Flow
//! ```text
//! token id + decimal amount
//!     → orchestrator.rs (token and amount checks, exact unit conversion)
//!     → sdk.rs (provider/signer session from the injected wallet)
//!     → pool.rs (pool contract redeemAuto)
//! ```

pub mod catalogue;
pub mod orchestrator;
pub mod pool;
pub mod sdk;

pub use catalogue::{Catalogue, CatalogueEntry};
pub use orchestrator::{RedemptionReceipt, RedemptionRequest};
pub use pool::PoolRedeemer;
pub use sdk::{RedemptionSdk, SdkError, SdkSession};
