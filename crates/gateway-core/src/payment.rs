//! # Payment Types
//!
//! Inbound request, processor-facing parameters, and the result handed back
//! to the caller.

use crate::error::{GatewayError, GatewayResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Smallest charge the processor accepts, in minor units.
pub const MINIMUM_AMOUNT: f64 = 50.0;

/// Currency used when the caller doesn't send one.
pub const DEFAULT_CURRENCY: &str = "usd";

pub const INVALID_AMOUNT_MESSAGE: &str = "Amount must be a number of at least 50 cents";
pub const INVALID_CURRENCY_MESSAGE: &str = "Currency must be a string";

/// Payment creation request as received from the client.
///
/// Fields are kept as raw JSON until validated: the caller is untrusted and
/// a string `"1500"` must be rejected, not coerced.
#[derive(Debug, Clone, Default)]
pub struct PaymentRequest {
    pub amount: Option<Value>,
    pub currency: Option<Value>,
}

impl PaymentRequest {
    /// Build from a parsed JSON body. Non-object bodies carry no fields.
    pub fn from_json(body: Value) -> Self {
        match body {
            Value::Object(mut map) => Self {
                amount: map.remove("amount"),
                currency: map.remove("currency"),
            },
            _ => Self::default(),
        }
    }

    /// Parse raw body bytes. Malformed JSON is not a validation failure.
    pub fn from_slice(body: &[u8]) -> GatewayResult<Self> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| GatewayError::Unhandled(format!("Malformed JSON body: {}", e)))?;
        Ok(Self::from_json(value))
    }

    /// Check the request and produce what gets sent to the processor.
    pub fn validate(&self) -> GatewayResult<ValidatedPayment> {
        let amount = self
            .amount
            .as_ref()
            .and_then(Value::as_f64)
            .filter(|a| a.is_finite() && *a >= MINIMUM_AMOUNT)
            .ok_or_else(|| GatewayError::Validation(INVALID_AMOUNT_MESSAGE.to_string()))?;

        let currency = match &self.currency {
            None | Some(Value::Null) => DEFAULT_CURRENCY.to_string(),
            Some(Value::String(c)) => c.clone(),
            Some(_) => {
                return Err(GatewayError::Validation(
                    INVALID_CURRENCY_MESSAGE.to_string(),
                ))
            }
        };

        Ok(ValidatedPayment {
            amount: amount.round() as i64,
            currency,
        })
    }
}

/// A request that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedPayment {
    /// Whole minor units
    pub amount: i64,
    pub currency: String,
}

/// Parameters for creating a payment intent at the processor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateIntentParams {
    pub amount: i64,
    pub currency: String,
    pub metadata: BTreeMap<String, String>,
}

impl CreateIntentParams {
    pub fn new(payment: ValidatedPayment) -> Self {
        Self {
            amount: payment.amount,
            currency: payment.currency,
            metadata: BTreeMap::new(),
        }
    }

    /// Builder: attach a metadata tag
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Payment intent as created by the processor
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
    pub amount: i64,
    pub currency: String,
}

/// Success body for a created payment intent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentResult {
    pub client_secret: String,
    pub amount: i64,
    pub currency: String,
    pub id: String,
}

impl From<PaymentIntent> for PaymentIntentResult {
    fn from(intent: PaymentIntent) -> Self {
        Self {
            client_secret: intent.client_secret,
            amount: intent.amount,
            currency: intent.currency,
            id: intent.id,
        }
    }
}
