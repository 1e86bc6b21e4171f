use anyhow::Error;
use std::fmt;

/// How a failed request failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Endpoint unreachable, timed out, or non-success status without an error payload
    NetworkFailure,
    /// Endpoint reachable and answered with an explicit `{ "error": ... }` payload
    ServiceError,
}

/// Explicit error payload returned by the classification service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceError {
    pub message: String,
}

impl ServiceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ServiceError {}

/// Classify an error based on its error chain
pub fn classify_error(error: &Error) -> FailureKind {
    if error.chain().any(|cause| cause.downcast_ref::<ServiceError>().is_some()) {
        FailureKind::ServiceError
    } else {
        FailureKind::NetworkFailure
    }
}

/// Format error message for a notice - the service's own words when it gave any,
/// otherwise the raw transport error
pub fn format_error_message(error: &Error) -> String {
    for cause in error.chain() {
        if let Some(service_err) = cause.downcast_ref::<ServiceError>() {
            return service_err.message.clone();
        }
        if let Some(reqwest_err) = cause.downcast_ref::<reqwest::Error>() {
            return reqwest_err.to_string();
        }
    }

    // Walk the chain to get the deepest (root cause) error
    error
        .chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| error.to_string())
}
