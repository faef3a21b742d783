use reqwest::{Client, StatusCode, header::{AUTHORIZATION, HeaderValue}};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use url::Url;

use crate::error::{Error, Result};
use crate::protocol::models::{SessionConfig, SessionCreated};

pub const BASE_URL: &str = "https://api.openai.com/v1/realtime";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);
const DEFAULT_POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

/// What the browser receives: the ephemeral key and its expiry, nothing else.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EphemeralCredential {
    pub client_secret: Option<Value>,
    pub expires_at: Option<Value>,
}

impl From<SessionCreated> for EphemeralCredential {
    fn from(created: SessionCreated) -> Self {
        let secret = created.client_secret.unwrap_or_default();
        Self {
            client_secret: secret.value,
            expires_at: secret.expires_at,
        }
    }
}

/// An adapter for the `OpenAI` Realtime REST API.
#[derive(Clone, Debug)]
pub struct RealtimeRestAdapter {
    client: Client,
    auth_header: HeaderValue,
    sessions_url: String,
}

impl RealtimeRestAdapter {
    /// Create a new adapter against the public API.
    ///
    /// # Errors
    /// Returns an error if the API key results in an invalid header or client build fails.
    pub fn new(api_key: &str) -> Result<Self> {
        Self::new_with_options(api_key, BASE_URL, DEFAULT_TIMEOUT)
    }

    /// Create a new adapter with a custom base URL and request timeout.
    ///
    /// # Errors
    /// Returns an error if the base URL does not parse, the API key results in
    /// an invalid header, or client build fails.
    pub fn new_with_options(api_key: &str, base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)?;

        let client = Client::builder()
            .timeout(timeout)
            .pool_idle_timeout(DEFAULT_POOL_IDLE_TIMEOUT)
            .build()?;

        let mut auth_header = HeaderValue::from_str(&format!("Bearer {api_key}"))?;
        auth_header.set_sensitive(true);

        let sessions_url = format!("{}/sessions", base_url.as_str().trim_end_matches('/'));

        Ok(Self {
            client,
            auth_header,
            sessions_url,
        })
    }

    #[must_use]
    pub fn sessions_url(&self) -> &str {
        &self.sessions_url
    }

    /// Create a realtime session and return its ephemeral credential.
    ///
    /// # Errors
    /// Returns [`Error::UpstreamUnavailable`] if no response arrives,
    /// [`Error::UpstreamRejected`] with the untouched status and body on any
    /// status other than 200, and [`Error::Serialization`] if the success body
    /// is not the expected JSON.
    pub async fn create_session(&self, session: &SessionConfig) -> Result<EphemeralCredential> {
        let res = self.client
            .post(&self.sessions_url)
            .header(AUTHORIZATION, &self.auth_header)
            .json(session)
            .send()
            .await
            .map_err(Error::UpstreamUnavailable)?;

        let status = res.status();
        let body = res.text().await.map_err(Error::UpstreamUnavailable)?;

        if status != StatusCode::OK {
            return Err(Error::UpstreamRejected {
                status: status.as_u16(),
                body,
            });
        }

        let created: SessionCreated = serde_json::from_str(&body)?;
        Ok(created.into())
    }
}
