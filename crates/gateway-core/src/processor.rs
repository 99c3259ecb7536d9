//! # Payment Processor Trait
//!
//! The seam between the gateway and the remote payment processor.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │          PaymentProcessor (trait)            │
//! │  ├── create_payment_intent()                 │
//! │  └── provider_name()                         │
//! └──────────────────────────────────────────────┘
//!                       ▲
//!          ┌────────────┴────────────┐
//!  ┌───────┴────────┐       ┌────────┴────────┐
//!  │ StripePayment  │       │  test doubles   │
//!  │    Intents     │       │                 │
//!  └────────────────┘       └─────────────────┘
//! ```

use crate::error::ProcessorError;
use crate::payment::{CreateIntentParams, PaymentIntent};
use async_trait::async_trait;
use std::sync::Arc;

/// A remote service able to create payment intents.
///
/// Implementations make exactly one attempt per call. Retrying is the
/// caller's decision and this gateway never does it: without an
/// idempotency key a retry can charge twice.
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    /// Create a payment intent for `params.amount` minor units.
    async fn create_payment_intent(
        &self,
        params: &CreateIntentParams,
    ) -> Result<PaymentIntent, ProcessorError>;

    /// Provider name, for logging.
    fn provider_name(&self) -> &'static str;
}

/// Processor handle shared across request tasks
pub type SharedProcessor = Arc<dyn PaymentProcessor>;
