//! Result reporting.
//!
//! Every operation result leaves the crate as an [`Outcome`]: the produced
//! data, or a typed failure with its kind and message. Errors that are not
//! already an [`ExchangeError`] are reported as `UnknownError`.

use std::error::Error as StdError;

use serde::Serialize;

use crate::error::{ErrorKind, ExchangeError, ExchangeResult};

/// A typed failure as shown to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureReport {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&ExchangeError> for FailureReport {
    fn from(e: &ExchangeError) -> Self {
        Self {
            kind: e.kind(),
            message: e.to_string(),
        }
    }
}

/// Normalized result of one operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome<T> {
    Success { operation: String, data: T },
    Failure { operation: String, error: FailureReport },
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Outcome::Success { data, .. } => Some(data),
            Outcome::Failure { .. } => None,
        }
    }

    pub fn failure(&self) -> Option<&FailureReport> {
        match self {
            Outcome::Success { .. } => None,
            Outcome::Failure { error, .. } => Some(error),
        }
    }
}

/// Normalize an operation result.
pub fn report<T>(operation: &str, result: ExchangeResult<T>) -> Outcome<T> {
    match result {
        Ok(data) => Outcome::Success {
            operation: operation.to_string(),
            data,
        },
        Err(e) => Outcome::Failure {
            operation: operation.to_string(),
            error: FailureReport::from(&e),
        },
    }
}

/// Report an arbitrary error, keeping its kind when it is an [`ExchangeError`].
pub fn report_error<T>(operation: &str, error: &(dyn StdError + 'static)) -> Outcome<T> {
    let error = match error.downcast_ref::<ExchangeError>() {
        Some(e) => FailureReport::from(e),
        None => FailureReport {
            kind: ErrorKind::UnknownError,
            message: error.to_string(),
        },
    };
    Outcome::Failure {
        operation: operation.to_string(),
        error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success() {
        let outcome = report("price", Ok(5u64));
        assert!(outcome.is_success());
        assert_eq!(outcome.data(), Some(&5));

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["data"], 5);
    }

    #[test]
    fn test_typed_failure() {
        let outcome: Outcome<()> =
            report("purchase", Err(ExchangeError::InvalidAmount("tonnes = 0".into())));
        let failure = outcome.failure().unwrap();
        assert_eq!(failure.kind, ErrorKind::InvalidAmount);
        assert_eq!(failure.message, "Invalid amount: tonnes = 0");

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "failure");
        assert_eq!(json["error"]["kind"], "InvalidAmount");
    }

    #[test]
    fn test_untyped_error_is_unknown() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let outcome: Outcome<()> = report_error("pricing", &io);
        let failure = outcome.failure().unwrap();
        assert_eq!(failure.kind, ErrorKind::UnknownError);
        assert_eq!(failure.message, "disk on fire");
    }

    #[test]
    fn test_exchange_error_keeps_kind() {
        let err = ExchangeError::WalletUnavailable;
        let outcome: Outcome<()> = report_error("status", &err);
        assert_eq!(outcome.failure().unwrap().kind, ErrorKind::WalletUnavailable);
    }
}
