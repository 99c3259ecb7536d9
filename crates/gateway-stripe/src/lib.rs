//! # gateway-stripe
//!
//! Stripe payment processor for the intent gateway.
//!
//! **StripePaymentIntents** creates Payment Intents through
//! `POST /v1/payment_intents` and returns the client secret used by
//! Stripe.js / mobile SDKs to confirm the payment.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gateway_stripe::StripePaymentIntents;
//! use gateway_core::{CreateIntentParams, PaymentProcessor};
//!
//! // Create processor from environment
//! let processor = StripePaymentIntents::from_env()?;
//!
//! let intent = processor.create_payment_intent(&params).await?;
//! println!("client secret: {}", intent.client_secret);
//! ```
//!
//! Errors keep Stripe's `error.type` so callers can tell an invalid request
//! (`invalid_request_error`) apart from outages, auth and rate-limit failures.

pub mod config;
pub mod intent;

// Re-exports
pub use config::{StripeConfig, StripeSetupError};
pub use intent::StripePaymentIntents;
