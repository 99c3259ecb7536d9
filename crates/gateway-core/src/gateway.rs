//! # Intent Gateway
//!
//! Validates a payment request, forwards it to the processor, and maps the
//! outcome into a `PaymentIntentResult` or a `GatewayError`.

use crate::error::GatewayResult;
use crate::payment::{CreateIntentParams, PaymentIntentResult, PaymentRequest};
use crate::processor::SharedProcessor;
use tracing::{debug, info, instrument};

/// Metadata key marking intents created through this integration
pub const INTEGRATION_CHECK_KEY: &str = "integration_check";
pub const INTEGRATION_CHECK_VALUE: &str = "accept_a_payment";
/// Metadata key carrying the running gateway version
pub const APP_VERSION_KEY: &str = "app_version";

/// Payment intent creation, independent of any HTTP framework.
#[derive(Clone)]
pub struct IntentGateway {
    processor: SharedProcessor,
    app_version: String,
}

impl IntentGateway {
    pub fn new(processor: SharedProcessor, app_version: impl Into<String>) -> Self {
        Self {
            processor,
            app_version: app_version.into(),
        }
    }

    pub fn provider_name(&self) -> &'static str {
        self.processor.provider_name()
    }

    /// Create a payment intent.
    ///
    /// Validation failures return before the processor is contacted.
    #[instrument(skip(self, request), fields(provider = self.provider_name()))]
    pub async fn create_payment_intent(
        &self,
        request: &PaymentRequest,
    ) -> GatewayResult<PaymentIntentResult> {
        let payment = request.validate()?;

        debug!(
            "Creating payment intent: amount={}, currency={}",
            payment.amount, payment.currency
        );

        let params = CreateIntentParams::new(payment)
            .with_metadata(INTEGRATION_CHECK_KEY, INTEGRATION_CHECK_VALUE)
            .with_metadata(APP_VERSION_KEY, self.app_version.as_str());

        let intent = self.processor.create_payment_intent(&params).await?;

        info!(
            "Created payment intent: id={}, amount={}, currency={}",
            intent.id, intent.amount, intent.currency
        );

        Ok(intent.into())
    }
}
