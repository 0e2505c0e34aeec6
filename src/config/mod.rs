//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ExchangeConfig (validated, immutable)
//!     → shared via Arc with the exchange client
//! ```
//!
//! # Design Decisions
//! - Config is read once and never changes for the process lifetime
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    ContractConfig, ExchangeConfig, NetworkConfig, ObservabilityConfig, PurchaseConfig,
    RedemptionConfig,
};
