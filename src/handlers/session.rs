use std::sync::Arc;

use axum::{Json, extract::State};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::state::AppState;
use crate::transport::rest::EphemeralCredential;

/// `POST /session`: mint an ephemeral Realtime credential for the browser.
pub async fn create_session(State(state): State<Arc<AppState>>) -> Result<Json<EphemeralCredential>> {
    match state.broker.create_session().await {
        Ok(credential) => {
            info!(expires_at = ?credential.expires_at, "realtime session created");
            Ok(Json(credential))
        }
        Err(e) => {
            match &e {
                Error::UpstreamRejected { status, .. } => {
                    warn!(status, "realtime API rejected session creation");
                }
                other => warn!(error = %other, "session creation failed"),
            }
            Err(e)
        }
    }
}
