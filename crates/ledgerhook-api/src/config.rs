//! Configuration management for the ledgerhook webhook ingestion service.

use std::{collections::HashMap, net::SocketAddr, str::FromStr, time::Duration};

use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use ledgerhook_xero::ClientConfig;
use serde::{Deserialize, Serialize};

const CONFIG_FILE: &str = "config.toml";

/// Complete service configuration with defaults, file, and environment
/// overrides.
///
/// Configuration is loaded in priority order:
/// 1. Environment variables (highest priority)
/// 2. Configuration file (`config.toml`)
/// 3. Built-in defaults (lowest priority)
///
/// Every setting except the webhook signing key ships with a usable
/// default. The signing key is issued per subscription by the accounting
/// platform and must be provided through `WEBHOOK_SIGNING_KEY` or
/// `config.toml` before the service starts.
///
/// # Example
///
/// ```no_run
/// use ledgerhook_api::Config;
///
/// // Load configuration from all sources
/// let config = Config::load().expect("Failed to load configuration");
///
/// println!("Server will bind to {}:{}", config.host, config.port);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Server
    /// Server bind address.
    ///
    /// Environment variable: `HOST`
    #[serde(default = "default_host", alias = "HOST")]
    pub host: String,
    /// Server bind port.
    ///
    /// Environment variable: `PORT`
    #[serde(default = "default_port", alias = "PORT")]
    pub port: u16,
    /// HTTP request timeout in seconds.
    ///
    /// Environment variable: `REQUEST_TIMEOUT`
    #[serde(default = "default_request_timeout", alias = "REQUEST_TIMEOUT")]
    pub request_timeout: u64,

    // Webhook verification
    /// Shared key the accounting platform signs webhook deliveries with.
    ///
    /// Environment variable: `WEBHOOK_SIGNING_KEY`
    #[serde(default, alias = "WEBHOOK_SIGNING_KEY")]
    pub webhook_signing_key: String,

    // Accounting API
    /// Base URL of the accounting API used for resource lookups.
    ///
    /// Environment variable: `XERO_BASE_URL`
    #[serde(default = "default_xero_base_url", alias = "XERO_BASE_URL")]
    pub xero_base_url: String,
    /// HTTP timeout for accounting API lookups in seconds.
    ///
    /// Environment variable: `XERO_TIMEOUT_SECONDS`
    #[serde(default = "default_xero_timeout", alias = "XERO_TIMEOUT_SECONDS")]
    pub xero_timeout_seconds: u64,
    /// Whether verified events are resolved against the accounting API as
    /// they arrive.
    ///
    /// Environment variable: `RESOLVE_ON_RECEIVE`
    #[serde(default, alias = "RESOLVE_ON_RECEIVE")]
    pub resolve_on_receive: bool,
    /// Static bearer tokens keyed by tenant id, for deployments without an
    /// external credential manager. File-only; there is no environment
    /// variable form.
    #[serde(default)]
    pub access_tokens: HashMap<String, String>,

    // Logging
    /// Log level configuration.
    ///
    /// Environment variable: `RUST_LOG`
    #[serde(default = "default_log_level", alias = "RUST_LOG")]
    pub rust_log: String,
}

impl Config {
    /// Load configuration from defaults, config file, and environment variable
    /// overrides.
    ///
    /// Configuration priority (highest to lowest):
    /// 1. Environment variables (e.g., `WEBHOOK_SIGNING_KEY`, `PORT`)
    /// 2. Configuration file (`config.toml`)
    /// 3. Built-in defaults
    ///
    /// # Errors
    ///
    /// Fails when a source cannot be read, a value does not parse, or
    /// validation rejects the merged result (most commonly a missing
    /// signing key).
    pub fn load() -> Result<Self> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(""));

        let config: Self = figment.extract().context("Failed to load configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Convert to the accounting client's configuration type.
    pub fn to_client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.xero_base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(self.xero_timeout_seconds),
            ..ClientConfig::default()
        }
    }

    /// Request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// Parse server socket address from host and port configuration.
    pub fn parse_server_addr(&self) -> Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.host, self.port);
        SocketAddr::from_str(&addr_str).context("Invalid server address")
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<()> {
        if self.port == 0 {
            anyhow::bail!("port must be greater than 0");
        }

        if self.request_timeout == 0 {
            anyhow::bail!("request_timeout must be greater than 0");
        }

        if self.webhook_signing_key.is_empty() {
            anyhow::bail!(
                "webhook_signing_key is not set; supply WEBHOOK_SIGNING_KEY or set it in {CONFIG_FILE}"
            );
        }

        if self.xero_timeout_seconds == 0 {
            anyhow::bail!("xero_timeout_seconds must be greater than 0");
        }

        if !self.xero_base_url.starts_with("http://") && !self.xero_base_url.starts_with("https://")
        {
            anyhow::bail!("xero_base_url must be an http(s) URL");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout: default_request_timeout(),
            webhook_signing_key: String::new(),
            xero_base_url: default_xero_base_url(),
            xero_timeout_seconds: default_xero_timeout(),
            resolve_on_receive: false,
            access_tokens: HashMap::new(),
            rust_log: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    30
}

fn default_xero_base_url() -> String {
    "https://api.xero.com/api.xro/2.0".to_string()
}

fn default_xero_timeout() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}
