//! Terminal configuration.
//!
//! Values come from command-line flags, falling back to environment variables
//! and then to a `.env` file in the working directory.

use std::time::Duration;

use clap::Parser;
use reqwest::Url;
use rusty_money::iso::{self, Currency};
use thiserror::Error;

use crate::page::CheckoutSettings;

/// Backend origin used when none is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// `cashier_code` identifying self-checkout purchases.
pub const SELF_CHECKOUT_CASHIER_CODE: &str = "9999999999";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid API URL {url}: {reason}")]
    InvalidApiUrl { url: String, reason: String },

    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    #[error("Could not build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// POS terminal configuration
#[derive(Debug, Clone, Parser)]
#[command(name = "pos", about = "Self-checkout POS terminal", long_about = None)]
pub struct PosConfig {
    /// Backend API origin
    #[arg(long, env = "POS_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Cashier code sent with every purchase
    #[arg(long, env = "POS_CASHIER_CODE", default_value = SELF_CHECKOUT_CASHIER_CODE)]
    pub cashier_code: String,

    /// Store code sent with every purchase
    #[arg(long, env = "POS_STORE_CODE")]
    pub store_code: Option<String>,

    /// Customer id sent with every purchase
    #[arg(long, env = "POS_CUSTOMER_ID")]
    pub customer_id: Option<String>,

    /// ISO 4217 code used to display amounts
    #[arg(long, env = "POS_CURRENCY", default_value = "JPY")]
    pub currency: String,

    /// Per-request timeout in seconds (no timeout when unset)
    #[arg(long, env = "POS_REQUEST_TIMEOUT_SECS")]
    pub request_timeout_secs: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,
}

impl PosConfig {
    /// Load configuration from `.env`, the environment and CLI arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if the arguments cannot be parsed.
    pub fn load() -> Result<Self, clap::Error> {
        dotenvy::dotenv().ok();

        Self::try_parse()
    }

    /// The API origin as a URL. Only `http` and `https` are accepted.
    pub fn api_base(&self) -> Result<Url, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidApiUrl {
            url: self.api_url.clone(),
            reason,
        };
        let url = Url::parse(&self.api_url).map_err(|e| invalid(e.to_string()))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(invalid(format!("unsupported scheme {other}"))),
        }
    }

    pub fn currency(&self) -> Result<&'static Currency, ConfigError> {
        iso::find(&self.currency).ok_or_else(|| ConfigError::UnknownCurrency(self.currency.clone()))
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn checkout_settings(&self) -> CheckoutSettings {
        CheckoutSettings {
            cashier_code: self.cashier_code.clone(),
            store_code: self.store_code.clone(),
            customer_id: self.customer_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> PosConfig {
        PosConfig::try_parse_from(std::iter::once("pos").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_explicit_flags() {
        let config = parse(&[
            "--api-url",
            "https://pos.example.com",
            "--cashier-code",
            "0042",
            "--store-code",
            "30",
            "--customer-id",
            "C-0001",
            "--currency",
            "USD",
            "--request-timeout-secs",
            "5",
        ]);

        assert_eq!(config.api_base().unwrap().as_str(), "https://pos.example.com/");
        assert_eq!(config.currency().unwrap().iso_alpha_code, "USD");
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(5)));
        assert_eq!(
            config.checkout_settings(),
            CheckoutSettings {
                cashier_code: "0042".to_string(),
                store_code: Some("30".to_string()),
                customer_id: Some("C-0001".to_string()),
            }
        );
    }

    #[test]
    fn test_rejects_non_http_url() {
        let config = parse(&["--api-url", "ftp://pos.example.com"]);

        assert!(matches!(config.api_base(), Err(ConfigError::InvalidApiUrl { .. })));
    }

    #[test]
    fn test_rejects_unknown_currency() {
        let config = parse(&["--currency", "XYZ1"]);

        assert!(matches!(config.currency(), Err(ConfigError::UnknownCurrency(_))));
    }

    #[test]
    fn test_default_checkout_settings_use_self_checkout_code() {
        assert_eq!(CheckoutSettings::default().cashier_code, SELF_CHECKOUT_CASHIER_CODE);
        assert_eq!(CheckoutSettings::default().store_code, None);
        assert_eq!(CheckoutSettings::default().customer_id, None);
    }
}
