//! Shared helpers for HTTP-level tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use gateway_api::{create_router, AppConfig, AppState};
use gateway_core::{CreateIntentParams, PaymentIntent, PaymentProcessor, ProcessorError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// What the fake processor does when called
pub enum Reply {
    /// Echo the requested amount/currency back with fixed ids
    Echo,
    /// Return this exact intent
    Intent(PaymentIntent),
    /// Fail with this error
    Fail(ProcessorError),
    /// Panic inside the call
    Panic,
}

/// Test double that counts calls and records the parameters it was given
pub struct RecordingProcessor {
    calls: AtomicUsize,
    last_params: Mutex<Option<CreateIntentParams>>,
    reply: Reply,
}

impl RecordingProcessor {
    pub fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            last_params: Mutex::new(None),
            reply,
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_params(&self) -> Option<CreateIntentParams> {
        self.last_params.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentProcessor for RecordingProcessor {
    async fn create_payment_intent(
        &self,
        params: &CreateIntentParams,
    ) -> Result<PaymentIntent, ProcessorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_params.lock().unwrap() = Some(params.clone());

        match &self.reply {
            Reply::Echo => Ok(PaymentIntent {
                id: "pi_test".to_string(),
                client_secret: "pi_test_secret_abc".to_string(),
                amount: params.amount,
                currency: params.currency.clone(),
            }),
            Reply::Intent(intent) => Ok(intent.clone()),
            Reply::Fail(err) => Err(err.clone()),
            Reply::Panic => panic!("processor exploded"),
        }
    }

    fn provider_name(&self) -> &'static str {
        "recording"
    }
}

/// Test server in development mode
pub fn server_with(processor: Arc<RecordingProcessor>) -> TestServer {
    server_with_config(AppConfig::default(), processor)
}

pub fn server_with_config(config: AppConfig, processor: Arc<RecordingProcessor>) -> TestServer {
    let state = AppState::with_processor(config, processor);
    TestServer::new(create_router(state)).unwrap()
}
