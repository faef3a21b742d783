use axum::Json;
use axum::http::{StatusCode, header::CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Body of every locally generated error response.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Error, Debug)]
pub enum Error {
    /// The server credential is absent or does not look like an API key.
    #[error("Server missing OPENAI_API_KEY")]
    MissingApiKey,

    /// The request to the Realtime API never produced a response.
    #[error("{0}")]
    UpstreamUnavailable(#[source] reqwest::Error),

    /// The Realtime API answered with something other than 200.
    #[error("Realtime API rejected session creation with status {status}")]
    UpstreamRejected { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to parse or serialize JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Header error: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::UpstreamRejected { status, body } => {
                let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
                (status, [(CONTENT_TYPE, "application/json")], body).into_response()
            }
            other => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody { error: other.to_string() }),
            )
                .into_response(),
        }
    }
}
