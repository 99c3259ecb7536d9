//! # Intent Gateway
//!
//! Creates Stripe payment intents for client-side checkout.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export STRIPE_SECRET_KEY=sk_test_...
//! export ENVIRONMENT=production
//! export ALLOWED_ORIGINS=https://shop.example.com
//!
//! # Run the server
//! intent-gateway
//! ```

use gateway_api::{routes, AppConfig, AppState};
use tokio::signal;
use tracing::{error, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();

    init_tracing(&config);
    print_banner();

    let addr = config.socket_addr()?;
    let is_prod = config.is_production();

    info!("Environment: {}", config.environment);
    if is_prod {
        info!("CORS allow-list: {:?}", config.allowed_origins);
    }

    // Initialize application state (fails fast without a valid Stripe key)
    let state = AppState::new(config).map_err(|e| {
        error!("Startup failed: {:#}", e);
        e
    })?;

    // Create router
    let app = routes::create_router(state);

    // Start server
    info!("🚀 Intent gateway starting on http://{}", addr);

    if !is_prod {
        info!("🩺 Health: GET http://{}/health", addr);
        info!("💳 Create intent: POST http://{}/payment/create", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// JSON logs in production, human-readable logs otherwise
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();

    let registry = tracing_subscriber::registry().with(filter);

    if config.is_production() {
        registry
            .with(fmt::layer().json().with_current_span(true))
            .init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

/// Resolves on SIGINT or SIGTERM; axum then stops accepting and drains in-flight requests
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, draining in-flight requests");
}

fn print_banner() {
    println!(
        r#"
  💳 Intent Gateway 💳
  ━━━━━━━━━━━━━━━━━━━━━━━
  Payment intent service
  Version: {}

"#,
        env!("CARGO_PKG_VERSION")
    );
}
