//! Session brokering for the browser client.
//!
//! The browser never sees the server credential. It asks the relay for a
//! session, the relay creates one upstream with a fixed configuration, and
//! only the short-lived client secret travels back.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::config::RelayConfig;
use crate::error::{Error, Result};
use crate::protocol::models::{DEFAULT_MODEL, Modality, SessionConfig, Tool, TurnDetection};
use crate::transport::rest::{EphemeralCredential, RealtimeRestAdapter};

pub const SHOPPING_VOICE: &str = "verse";
pub const FILTER_PRODUCTS_TOOL: &str = "filter_products";
pub const SHOPPING_INSTRUCTIONS: &str = "You are a voice shopping assistant. When helpful, call filter_products with category (required), optional color and max_price.";

/// Anything that can turn a session configuration into an ephemeral credential.
#[async_trait]
pub trait SessionMinter: Send + Sync {
    async fn create_session(&self, session: &SessionConfig) -> Result<EphemeralCredential>;
}

#[async_trait]
impl SessionMinter for RealtimeRestAdapter {
    async fn create_session(&self, session: &SessionConfig) -> Result<EphemeralCredential> {
        Self::create_session(self, session).await
    }
}

/// The `filter_products` function declaration advertised to the model.
#[must_use]
pub fn filter_products_tool() -> Tool {
    Tool::Function {
        name: FILTER_PRODUCTS_TOOL.to_string(),
        description: Some("Filters products in an online store.".to_string()),
        parameters: json!({
            "type": "object",
            "properties": {
                "category": {
                    "type": "string",
                    "description": "Product category, e.g. shoes, shirts"
                },
                "color": {
                    "type": "string",
                    "description": "Color of the product"
                },
                "max_price": {
                    "type": "number",
                    "description": "Maximum price in USD"
                }
            },
            "required": ["category"]
        }),
    }
}

/// The fixed session every browser client gets.
#[must_use]
pub fn shopping_session() -> SessionConfig {
    SessionConfig::new(DEFAULT_MODEL)
        .voice(SHOPPING_VOICE)
        .modalities([Modality::Text, Modality::Audio])
        .turn_detection(TurnDetection::server_vad_default())
        .tool(filter_products_tool())
        .instructions(SHOPPING_INSTRUCTIONS)
}

#[derive(Clone)]
pub struct SessionBroker {
    minter: Option<Arc<dyn SessionMinter>>,
    session: SessionConfig,
}

impl std::fmt::Debug for SessionBroker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionBroker")
            .field("configured", &self.is_configured())
            .field("model", &self.session.model)
            .finish()
    }
}

impl SessionBroker {
    /// Build the broker from startup configuration.
    ///
    /// A missing or malformed credential is not a startup failure; the broker
    /// is built unconfigured and refuses every session request.
    ///
    /// # Errors
    /// Returns an error if the credential cannot be placed in a header or the
    /// HTTP client cannot be built.
    pub fn from_config(config: &RelayConfig) -> Result<Self> {
        let Some(api_key) = config.usable_api_key() else {
            tracing::warn!("OPENAI_API_KEY is missing or malformed; /session will fail");
            return Ok(Self::unconfigured());
        };

        let adapter = RealtimeRestAdapter::new_with_options(
            api_key,
            &config.realtime_base_url,
            config.upstream_timeout,
        )?;
        tracing::info!(url = adapter.sessions_url(), "Realtime session broker ready");
        Ok(Self::with_minter(Arc::new(adapter)))
    }

    #[must_use]
    pub fn with_minter(minter: Arc<dyn SessionMinter>) -> Self {
        Self {
            minter: Some(minter),
            session: shopping_session(),
        }
    }

    #[must_use]
    pub fn unconfigured() -> Self {
        Self {
            minter: None,
            session: shopping_session(),
        }
    }

    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.minter.is_some()
    }

    #[must_use]
    pub const fn session(&self) -> &SessionConfig {
        &self.session
    }

    /// Mint one ephemeral credential. No retries.
    ///
    /// # Errors
    /// Returns [`Error::MissingApiKey`] without any outbound call when the
    /// broker is unconfigured, otherwise whatever the minter reports.
    pub async fn create_session(&self) -> Result<EphemeralCredential> {
        let minter = self.minter.as_ref().ok_or(Error::MissingApiKey)?;
        minter.create_session(&self.session).await
    }
}
