//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Every client operation produces:
//!     → logging.rs (structured log events inside a per-flow span)
//!     → metrics.rs (operation counters and durations)
//! ```
//!
//! # Design Decisions
//! - Each flow carries a UUID `flow_id` so its log lines can be correlated
//! - Logs go to stderr; stdout is reserved for command output
//! - Metrics go through the `metrics` facade; no exporter is installed here

pub mod logging;
pub mod metrics;
