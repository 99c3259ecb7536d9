//! # Stripe Payment Intents
//!
//! Implementation of the Stripe Payment Intents API.
//! Creates an intent server-side and hands its client secret to the caller,
//! who completes the payment with Stripe.js or a mobile SDK.

use crate::config::{StripeConfig, StripeSetupError};
use async_trait::async_trait;
use gateway_core::{
    CreateIntentParams, PaymentIntent, PaymentProcessor, ProcessorError, ProcessorErrorKind,
};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, instrument};

/// Stripe Payment Intents processor
pub struct StripePaymentIntents {
    config: StripeConfig,
    client: Client,
}

impl StripePaymentIntents {
    /// Create a new processor. The client timeout comes from `config.timeout`.
    pub fn new(config: StripeConfig) -> Result<Self, StripeSetupError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, StripeSetupError> {
        let config = StripeConfig::from_env()?;
        Self::new(config)
    }

    pub fn config(&self) -> &StripeConfig {
        &self.config
    }

    /// Build form data for the Stripe API
    fn form_params(params: &CreateIntentParams) -> Vec<(String, String)> {
        let mut form = vec![
            ("amount".to_string(), params.amount.to_string()),
            ("currency".to_string(), params.currency.clone()),
        ];
        for (key, value) in &params.metadata {
            form.push((format!("metadata[{}]", key), value.clone()));
        }
        form
    }
}

#[async_trait]
impl PaymentProcessor for StripePaymentIntents {
    #[instrument(skip(self, params), fields(amount = params.amount, currency = %params.currency))]
    async fn create_payment_intent(
        &self,
        params: &CreateIntentParams,
    ) -> Result<PaymentIntent, ProcessorError> {
        let url = format!("{}/v1/payment_intents", self.config.api_base_url);

        debug!("Creating Stripe payment intent");

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
            .form(&Self::form_params(params))
            .send()
            .await
            .map_err(|e| ProcessorError::connection(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProcessorError::connection(e.to_string()))?;

        if !status.is_success() {
            error!("Stripe API error: status={}, body={}", status, body);
            return Err(parse_error_body(status.as_u16(), &body));
        }

        let intent: StripePaymentIntentResponse = serde_json::from_str(&body).map_err(|e| {
            ProcessorError::new(
                ProcessorErrorKind::Api,
                format!("Failed to parse Stripe response: {}", e),
            )
        })?;

        let client_secret = intent.client_secret.ok_or_else(|| {
            ProcessorError::new(
                ProcessorErrorKind::Api,
                format!("Stripe payment intent {} has no client_secret", intent.id),
            )
        })?;

        Ok(PaymentIntent {
            id: intent.id,
            client_secret,
            amount: intent.amount,
            currency: intent.currency,
        })
    }

    fn provider_name(&self) -> &'static str {
        "stripe"
    }
}

/// Turn a non-2xx Stripe response into a classified error
fn parse_error_body(status: u16, body: &str) -> ProcessorError {
    match serde_json::from_str::<StripeErrorResponse>(body) {
        Ok(StripeErrorResponse { error }) => {
            let kind = error
                .error_type
                .as_deref()
                .map(ProcessorErrorKind::from_type)
                .unwrap_or(ProcessorErrorKind::Api);
            let message = error
                .message
                .unwrap_or_else(|| format!("Stripe returned HTTP {}", status));
            let err = ProcessorError::new(kind, message);
            match error.code {
                Some(code) => err.with_code(code),
                None => err,
            }
        }
        Err(_) => ProcessorError::new(
            ProcessorErrorKind::Api,
            format!("HTTP {}: {}", status, body),
        ),
    }
}

// =============================================================================
// Stripe API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct StripePaymentIntentResponse {
    id: String,
    amount: i64,
    currency: String,
    #[serde(default)]
    client_secret: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeError,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    #[serde(default)]
    message: Option<String>,
    #[serde(rename = "type", default)]
    error_type: Option<String>,
    #[serde(default)]
    code: Option<String>,
}
