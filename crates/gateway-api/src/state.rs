//! # Application State
//!
//! Shared state for the Axum application.
//! Holds the intent gateway (with its injected processor) and configuration.

use gateway_core::{IntentGateway, SharedProcessor};
use gateway_stripe::StripePaymentIntents;
use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// `production` / `prod` select production, anything else is development.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            _ => Environment::Development,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development or production)
    pub environment: Environment,
    /// CORS allow-list, enforced in production only
    pub allowed_origins: Vec<String>,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: lookup("PORT")
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(DEFAULT_PORT),
            environment: lookup("ENVIRONMENT")
                .map(|e| Environment::parse(&e))
                .unwrap_or(Environment::Development),
            allowed_origins: lookup("ALLOWED_ORIGINS")
                .map(|raw| parse_origins(&raw))
                .unwrap_or_default(),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid socket address {}:{}: {}", self.host, self.port, e))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            environment: Environment::Development,
            allowed_origins: Vec::new(),
        }
    }
}

/// Split a comma-separated origin list, dropping blanks
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|o| o.trim().trim_end_matches('/'))
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Payment intent gateway
    pub gateway: IntentGateway,
    /// Application config
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Create state backed by the Stripe processor configured from the environment.
    ///
    /// Fails when the Stripe key is missing or malformed.
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let stripe = StripePaymentIntents::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Stripe: {}", e))?;

        tracing::info!(
            "Stripe initialized: test_mode={}, live_mode={}, api_base_url={}",
            stripe.config().is_test_mode(),
            stripe.config().is_live_mode(),
            stripe.config().api_base_url
        );

        Ok(Self::with_processor(config, Arc::new(stripe)))
    }

    /// Create state around any processor (test doubles included)
    pub fn with_processor(config: AppConfig, processor: SharedProcessor) -> Self {
        Self {
            gateway: IntentGateway::new(processor, env!("CARGO_PKG_VERSION")),
            config: Arc::new(config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<&str, &str> = vars.iter().copied().collect();
        AppConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()))
    }

    #[test]
    fn test_app_config_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.environment, Environment::Development);
        assert!(config.allowed_origins.is_empty());
    }

    #[test]
    fn test_app_config_production() {
        let config = config_from(&[
            ("ENVIRONMENT", "production"),
            ("PORT", "8443"),
            (
                "ALLOWED_ORIGINS",
                "https://shop.example.com, https://admin.example.com/ ,",
            ),
        ]);

        assert!(config.is_production());
        assert_eq!(config.port, 8443);
        assert_eq!(
            config.allowed_origins,
            vec!["https://shop.example.com", "https://admin.example.com"]
        );
    }

    #[test]
    fn test_environment_parse() {
        assert_eq!(Environment::parse("prod"), Environment::Production);
        assert_eq!(Environment::parse("PRODUCTION"), Environment::Production);
        assert_eq!(Environment::parse("dev"), Environment::Development);
        assert_eq!(Environment::parse("staging"), Environment::Development);
    }

    #[test]
    fn test_bad_port_falls_back() {
        let config = config_from(&[("PORT", "not-a-port")]);
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn test_socket_addr() {
        let config = AppConfig {
            port: 3000,
            ..AppConfig::default()
        };
        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:3000");

        let config = AppConfig {
            host: "not a host".to_string(),
            ..AppConfig::default()
        };
        assert!(config.socket_addr().is_err());
    }
}
