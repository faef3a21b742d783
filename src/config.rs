//! Relay configuration.
//!
//! Built once at startup from the environment (after `.env` is loaded) and
//! then shared read-only. Request handlers never consult the environment.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};
use crate::transport::rest::{BASE_URL, DEFAULT_TIMEOUT};

/// Prefix every usable `OpenAI` secret key starts with.
pub const API_KEY_PREFIX: &str = "sk-";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_CATALOG_PATH: &str = "data/products.json";
pub const DEFAULT_CORS_ORIGINS: &str = "*";

#[derive(Clone)]
pub struct RelayConfig {
    pub host: String,
    pub port: u16,
    /// Server-held credential for the Realtime API. May be absent; session
    /// requests are refused at request time when it is.
    pub openai_api_key: Option<String>,
    pub catalog_path: PathBuf,
    /// Validated at load time.
    pub realtime_base_url: String,
    pub upstream_timeout: Duration,
    /// `*` or a comma-separated origin list.
    pub cors_allowed_origins: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            openai_api_key: None,
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            realtime_base_url: BASE_URL.to_string(),
            upstream_timeout: DEFAULT_TIMEOUT,
            cors_allowed_origins: DEFAULT_CORS_ORIGINS.to_string(),
        }
    }
}

impl fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("openai_api_key", &self.openai_api_key.as_ref().map(|_| "<redacted>"))
            .field("catalog_path", &self.catalog_path)
            .field("realtime_base_url", &self.realtime_base_url)
            .field("upstream_timeout", &self.upstream_timeout)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .finish()
    }
}

impl RelayConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    /// Returns an error if a numeric or URL variable cannot be parsed.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// Empty values count as unset.
    ///
    /// # Errors
    /// Returns an error if a numeric or URL variable cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(host) = get("HOST") {
            config.host = host;
        }
        if let Some(port) = get("PORT") {
            config.port = parse_var("PORT", &port)?;
        }
        config.openai_api_key = get("OPENAI_API_KEY");
        if let Some(path) = get("CATALOG_PATH") {
            config.catalog_path = PathBuf::from(path);
        }
        if let Some(url) = get("REALTIME_BASE_URL") {
            config.realtime_base_url = Url::parse(&url)?.to_string();
        }
        if let Some(secs) = get("UPSTREAM_TIMEOUT_SECS") {
            config.upstream_timeout = Duration::from_secs(parse_var("UPSTREAM_TIMEOUT_SECS", &secs)?);
        }
        if let Some(origins) = get("CORS_ALLOWED_ORIGINS") {
            config.cors_allowed_origins = origins;
        }

        Ok(config)
    }

    /// The credential, only if it passes the lexical prefix check.
    #[must_use]
    pub fn usable_api_key(&self) -> Option<&str> {
        self.openai_api_key
            .as_deref()
            .filter(|key| key.starts_with(API_KEY_PREFIX))
    }

    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| Error::Config(format!("{key}={value}: {e}")))
}
