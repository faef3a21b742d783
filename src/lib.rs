#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::multiple_crate_versions)]

//! Backend relay for a voice shopping assistant.
//!
//! Two stateless endpoints: `POST /session` mints an ephemeral `OpenAI`
//! Realtime credential with a fixed shopping-assistant configuration, and
//! `POST /filter` narrows a static product catalog on behalf of the model's
//! `filter_products` tool.

pub mod broker;
pub mod catalog;
pub mod config;
pub mod error;
pub mod handlers;
pub mod protocol;
pub mod routes;
pub mod state;
pub mod transport;

pub use broker::{SessionBroker, SessionMinter, filter_products_tool, shopping_session};
pub use catalog::{Catalog, FilterCriteria, FilterOutcome, FilterRequest, FilterResponse, Product};
pub use config::RelayConfig;
pub use error::{Error, Result};
pub use routes::create_router;
pub use state::AppState;
pub use transport::rest::{EphemeralCredential, RealtimeRestAdapter};
