//! # gateway-core
//!
//! Core types and traits for the intent gateway.
//!
//! This crate provides:
//! - `PaymentProcessor` trait for the remote payment processor
//! - `PaymentRequest`, `CreateIntentParams`, `PaymentIntent` and `PaymentIntentResult`
//! - `IntentGateway`, which validates requests and maps processor outcomes
//! - `GatewayError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use gateway_core::{IntentGateway, PaymentRequest};
//!
//! let gateway = IntentGateway::new(processor, env!("CARGO_PKG_VERSION"));
//!
//! let request = PaymentRequest::from_slice(br#"{"amount": 1500, "currency": "eur"}"#)?;
//! let result = gateway.create_payment_intent(&request).await?;
//!
//! // Hand result.client_secret to the client-side SDK
//! ```

pub mod error;
pub mod gateway;
pub mod payment;
pub mod processor;

// Re-exports for convenience
pub use error::{
    GatewayError, GatewayResult, ProcessorError, ProcessorErrorKind, GENERIC_ERROR_MESSAGE,
};
pub use gateway::IntentGateway;
pub use payment::{
    CreateIntentParams, PaymentIntent, PaymentIntentResult, PaymentRequest, ValidatedPayment,
    DEFAULT_CURRENCY, MINIMUM_AMOUNT,
};
pub use processor::{PaymentProcessor, SharedProcessor};
