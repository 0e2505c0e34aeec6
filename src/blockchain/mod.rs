//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Injected wallet (chain id, signer)
//!     → network.rs (fail closed on the wrong chain)
//!     → session.rs (fresh signer-bound handle per flow)
//!     → contract.rs (fixed ABI: reads and purchase)
//! ```
//!
//! # Security Constraints
//! - No private keys: all signing happens inside the wallet
//! - No contract call before the network check passes
//! - All wallet RPC calls have configurable timeouts

pub mod contract;
pub mod network;
pub mod session;
pub mod types;
pub mod wallet;

pub use contract::ContractHandle;
pub use types::{BlockchainError, ChainId, NetworkContext, TransactionOutcome};
pub use wallet::{RpcWallet, TransactionSigner, WalletProvider};
