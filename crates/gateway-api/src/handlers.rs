//! # Request Handlers
//!
//! Axum request handlers for the payment intent API.

use crate::state::AppState;
use axum::{
    body::{to_bytes, Body},
    extract::{OriginalUri, State},
    http::{header, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use gateway_core::{GatewayError, PaymentIntentResult, PaymentRequest, GENERIC_ERROR_MESSAGE};
use http_body_util::LengthLimitError;
use serde::Serialize;
use tracing::{error, instrument, warn};

/// Largest payment request body we buffer
pub const MAX_BODY_BYTES: usize = 64 * 1024;

// =============================================================================
// Response Types
// =============================================================================

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: None,
            error_type: None,
        }
    }
}

impl From<&GatewayError> for ErrorResponse {
    fn from(err: &GatewayError) -> Self {
        let mut response = ErrorResponse::new(err.public_message());
        if let Some(processor_err) = err.processor_error() {
            response.code = processor_err.code.clone();
            response.error_type = Some(processor_err.kind.as_str().to_string());
        }
        response
    }
}

/// `GatewayError` rendered as an HTTP response
pub struct ApiError(pub GatewayError);

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(ErrorResponse::from(&self.0))).into_response()
    }
}

/// Body for 500s raised outside a handler's own error path
pub fn internal_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(GENERIC_ERROR_MESSAGE)),
    )
        .into_response()
}

/// True for `application/json` and `application/*+json`, parameters ignored
pub fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };

    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

fn log_failure(method: &Method, path: &str, err: &GatewayError) {
    match err {
        GatewayError::UnsupportedMediaType(_)
        | GatewayError::PayloadTooLarge(_)
        | GatewayError::Validation(_) => {
            warn!(%method, path, reason = err.public_message(), "Rejected payment request");
        }
        GatewayError::RemoteValidation(e) | GatewayError::RemoteService(e) => {
            error!(
                %method,
                path,
                error_message = %e.message,
                error_code = e.code.as_deref().unwrap_or("-"),
                error_type = e.kind.as_str(),
                "Payment processor error"
            );
        }
        GatewayError::Unhandled(detail) => {
            error!(%method, path, detail = %detail, "Unhandled error");
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
///
/// Liveness only: never calls the payment processor.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "intent-gateway",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Create a payment intent
///
/// The body stays unread until the content type is known to be JSON, then is
/// buffered up to `MAX_BODY_BYTES`. Content-type, size and JSON failures map
/// to our own error kinds instead of axum's extractor rejections.
#[instrument(skip_all, fields(provider = state.gateway.provider_name()))]
pub async fn create_payment_intent(
    State(state): State<AppState>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    body: Body,
) -> Result<(StatusCode, Json<PaymentIntentResult>), ApiError> {
    let outcome = create_payment_intent_inner(&state, &headers, body).await;

    outcome
        .map(|result| (StatusCode::CREATED, Json(result)))
        .map_err(|err| {
            log_failure(&method, uri.path(), &err);
            ApiError(err)
        })
}

async fn create_payment_intent_inner(
    state: &AppState,
    headers: &HeaderMap,
    body: Body,
) -> Result<PaymentIntentResult, GatewayError> {
    if !is_json_content_type(headers) {
        let declared = headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("none");
        return Err(GatewayError::UnsupportedMediaType(format!(
            "Content-Type must be application/json, got {}",
            declared
        )));
    }

    let bytes = to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|e| {
            let inner = e.into_inner();
            if inner.is::<LengthLimitError>() {
                GatewayError::PayloadTooLarge(format!(
                    "Request body must not exceed {} bytes",
                    MAX_BODY_BYTES
                ))
            } else {
                GatewayError::Unhandled(format!("Failed to read request body: {}", inner))
            }
        })?;

    let request = PaymentRequest::from_slice(&bytes)?;
    state.gateway.create_payment_intent(&request).await
}

/// Fallback for unknown routes
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::new("Not found")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use gateway_core::{ProcessorError, ProcessorErrorKind};

    fn headers_with(content_type: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
        headers
    }

    #[test]
    fn test_json_content_types() {
        assert!(is_json_content_type(&headers_with("application/json")));
        assert!(is_json_content_type(&headers_with(
            "application/json; charset=utf-8"
        )));
        assert!(is_json_content_type(&headers_with("Application/JSON")));
        assert!(is_json_content_type(&headers_with("application/merge-patch+json")));
    }

    #[test]
    fn test_non_json_content_types() {
        assert!(!is_json_content_type(&HeaderMap::new()));
        assert!(!is_json_content_type(&headers_with("text/plain")));
        assert!(!is_json_content_type(&headers_with(
            "application/x-www-form-urlencoded"
        )));
        assert!(!is_json_content_type(&headers_with("text/json+html")));
    }

    #[test]
    fn test_error_response_carries_processor_fields() {
        let err = GatewayError::from(
            ProcessorError::new(ProcessorErrorKind::InvalidRequest, "Invalid currency: zzz")
                .with_code("parameter_invalid_string"),
        );
        let body = serde_json::to_value(ErrorResponse::from(&err)).unwrap();

        assert_eq!(body["error"], "Invalid currency: zzz");
        assert_eq!(body["code"], "parameter_invalid_string");
        assert_eq!(body["type"], "invalid_request_error");
    }

    #[test]
    fn test_validation_error_has_only_message() {
        let err = GatewayError::Validation("Amount must be a number of at least 50 cents".into());
        let body = serde_json::to_value(ErrorResponse::from(&err)).unwrap();

        assert_eq!(
            body,
            serde_json::json!({ "error": "Amount must be a number of at least 50 cents" })
        );
    }

    #[test]
    fn test_api_error_status() {
        let response = ApiError(GatewayError::UnsupportedMediaType("text/plain".into())).into_response();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

        let response = ApiError(GatewayError::PayloadTooLarge("too big".into())).into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

        let response = ApiError(GatewayError::Unhandled("boom".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
