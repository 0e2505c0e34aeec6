//! Metrics collection.
//!
//! # Metrics
//! - `carbon_exchange_operations_total` (counter): operations by name and outcome
//! - `carbon_exchange_operation_duration_seconds` (histogram): time per operation
//!
//! Outcome is `success` or the failure kind (`invalid_amount`, `read_error`, ...).

use std::time::Duration;

use metrics::{counter, histogram};

use crate::error::ExchangeError;

/// Record the completion of one operation.
pub fn record_operation(operation: &'static str, result: Result<(), &ExchangeError>, elapsed: Duration) {
    let outcome = match result {
        Ok(()) => "success",
        Err(e) => e.kind().as_str(),
    };
    counter!(
        "carbon_exchange_operations_total",
        "operation" => operation,
        "outcome" => outcome
    )
    .increment(1);
    histogram!(
        "carbon_exchange_operation_duration_seconds",
        "operation" => operation
    )
    .record(elapsed.as_secs_f64());
}
