use std::sync::Arc;

use crate::broker::SessionBroker;
use crate::catalog::Catalog;
use crate::config::RelayConfig;
use crate::error::Result;

/// Shared, read-only state handed to every handler.
#[derive(Debug)]
pub struct AppState {
    pub config: RelayConfig,
    pub broker: SessionBroker,
    pub catalog: Catalog,
}

impl AppState {
    /// # Errors
    /// Returns an error if the session broker cannot be built.
    pub fn new(config: RelayConfig) -> Result<Arc<Self>> {
        let broker = SessionBroker::from_config(&config)?;
        let catalog = Catalog::new(config.catalog_path.clone());
        Ok(Arc::new(Self {
            config,
            broker,
            catalog,
        }))
    }

    /// Assemble state from prebuilt parts.
    #[must_use]
    pub fn from_parts(config: RelayConfig, broker: SessionBroker, catalog: Catalog) -> Arc<Self> {
        Arc::new(Self {
            config,
            broker,
            catalog,
        })
    }
}
