//! # Gateway Error Types
//!
//! Typed error handling for the intent gateway.
//! Every failure a request can hit maps to exactly one `GatewayError` kind,
//! and every kind maps to exactly one HTTP status.

use thiserror::Error;

/// Message returned to callers for any failure we don't want to describe.
pub const GENERIC_ERROR_MESSAGE: &str = "Internal server error";

/// Failure classes reported by a payment processor.
///
/// Names follow Stripe's `error.type` values since that is the processor
/// this gateway talks to; anything else lands in `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessorErrorKind {
    /// The request we built was rejected as invalid (bad currency, amount too large, ...)
    InvalidRequest,
    /// Card declined or similar
    Card,
    /// Too many requests
    RateLimit,
    /// Bad or revoked API key
    Authentication,
    /// Idempotency key reused with different parameters
    Idempotency,
    /// Processor-side failure
    Api,
    /// Could not reach the processor at all
    Connection,
    /// Type string we don't recognise
    Unknown(String),
}

impl ProcessorErrorKind {
    /// Parse a Stripe `error.type` string
    pub fn from_type(error_type: &str) -> Self {
        match error_type {
            "invalid_request_error" => Self::InvalidRequest,
            "card_error" => Self::Card,
            "rate_limit_error" => Self::RateLimit,
            "authentication_error" => Self::Authentication,
            "idempotency_error" => Self::Idempotency,
            "api_error" => Self::Api,
            "api_connection_error" => Self::Connection,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::InvalidRequest => "invalid_request_error",
            Self::Card => "card_error",
            Self::RateLimit => "rate_limit_error",
            Self::Authentication => "authentication_error",
            Self::Idempotency => "idempotency_error",
            Self::Api => "api_error",
            Self::Connection => "api_connection_error",
            Self::Unknown(other) => other.as_str(),
        }
    }
}

/// Error returned by a `PaymentProcessor`
#[derive(Debug, Clone, Error)]
#[error("{kind:?}: {message}")]
pub struct ProcessorError {
    pub kind: ProcessorErrorKind,
    pub message: String,
    /// Processor-specific error code (e.g. `amount_too_small`)
    pub code: Option<String>,
}

impl ProcessorError {
    pub fn new(kind: ProcessorErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            code: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Shorthand for a connection-level failure
    pub fn connection(message: impl Into<String>) -> Self {
        Self::new(ProcessorErrorKind::Connection, message)
    }

    /// True when the processor blamed the input we sent it
    pub fn is_invalid_request(&self) -> bool {
        self.kind == ProcessorErrorKind::InvalidRequest
    }
}

/// Core error type for gateway operations
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Request body is not declared as JSON
    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    /// Request body exceeds the accepted size
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// Request rejected before the processor was contacted
    #[error("Validation error: {0}")]
    Validation(String),

    /// Processor rejected the request we built from caller input
    #[error("Processor rejected request: {}", .0.message)]
    RemoteValidation(ProcessorError),

    /// Any other processor failure (network, auth, rate limits, outages)
    #[error("Processor failure: {}", .0.message)]
    RemoteService(ProcessorError),

    /// Anything else; detail is logged, never returned
    #[error("Unhandled error: {0}")]
    Unhandled(String),
}

impl From<ProcessorError> for GatewayError {
    fn from(err: ProcessorError) -> Self {
        if err.is_invalid_request() {
            GatewayError::RemoteValidation(err)
        } else {
            GatewayError::RemoteService(err)
        }
    }
}

impl GatewayError {
    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            GatewayError::UnsupportedMediaType(_) => 415,
            GatewayError::PayloadTooLarge(_) => 413,
            GatewayError::Validation(_) => 400,
            GatewayError::RemoteValidation(_) => 400,
            GatewayError::RemoteService(_) => 500,
            GatewayError::Unhandled(_) => 500,
        }
    }

    /// Message safe to hand back to the caller
    pub fn public_message(&self) -> &str {
        match self {
            GatewayError::UnsupportedMediaType(msg)
            | GatewayError::PayloadTooLarge(msg)
            | GatewayError::Validation(msg) => msg,
            GatewayError::RemoteValidation(err) | GatewayError::RemoteService(err) => &err.message,
            GatewayError::Unhandled(_) => GENERIC_ERROR_MESSAGE,
        }
    }

    /// The processor error behind this failure, if there is one
    pub fn processor_error(&self) -> Option<&ProcessorError> {
        match self {
            GatewayError::RemoteValidation(err) | GatewayError::RemoteService(err) => Some(err),
            _ => None,
        }
    }
}

/// Result type alias for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            GatewayError::UnsupportedMediaType("text/plain".into()).status_code(),
            415
        );
        assert_eq!(
            GatewayError::PayloadTooLarge("too big".into()).status_code(),
            413
        );
        assert_eq!(GatewayError::Validation("bad".into()).status_code(), 400);
        assert_eq!(GatewayError::Unhandled("boom".into()).status_code(), 500);
    }

    #[test]
    fn test_processor_error_classification() {
        let invalid = ProcessorError::new(ProcessorErrorKind::InvalidRequest, "Invalid currency");
        assert!(matches!(
            GatewayError::from(invalid),
            GatewayError::RemoteValidation(_)
        ));

        for kind in [
            ProcessorErrorKind::Connection,
            ProcessorErrorKind::Api,
            ProcessorErrorKind::RateLimit,
            ProcessorErrorKind::Authentication,
            ProcessorErrorKind::Card,
            ProcessorErrorKind::Unknown("weird_error".into()),
        ] {
            let err = GatewayError::from(ProcessorError::new(kind, "nope"));
            assert_eq!(err.status_code(), 500);
        }
    }

    #[test]
    fn test_unhandled_hides_detail() {
        let err = GatewayError::Unhandled("expected value at line 1 column 2".into());
        assert_eq!(err.public_message(), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn test_kind_round_trips_stripe_types() {
        assert_eq!(
            ProcessorErrorKind::from_type("invalid_request_error"),
            ProcessorErrorKind::InvalidRequest
        );
        assert_eq!(
            ProcessorErrorKind::from_type("something_new").as_str(),
            "something_new"
        );
    }
}
