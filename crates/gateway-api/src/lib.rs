//! # gateway-api
//!
//! HTTP API layer for the intent gateway.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - Payment intent creation endpoint
//! - Liveness check
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Liveness check |
//! | POST | `/payment/create` | Create a payment intent |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState, Environment};
