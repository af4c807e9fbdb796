//! Errors surfaced by the platform clients.
//!
//! The bootstrapper itself never recovers from any of these; a failure while
//! building the context is fatal to the caller.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("missing required option: {0}")]
    MissingOption(&'static str),
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("backend returned {status}: {message}")]
    Api { status: StatusCode, message: String },
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("no user is signed in")]
    NotSignedIn,
    #[error("document not found: {0}")]
    NotFound(String),
    #[error("invalid path: {0}")]
    InvalidPath(String),
    #[error("invalid endpoint URL: {0}")]
    InvalidEndpoint(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error envelope shared by the Identity Toolkit and Firestore REST APIs.
#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl Error {
    /// Builds an `Api` error from a non-success response, keeping the backend's
    /// message (e.g. `EMAIL_NOT_FOUND`) when the body carries one.
    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ErrorEnvelope>(&body) {
            Ok(envelope) => envelope.error.message,
            Err(_) if body.is_empty() => status.to_string(),
            Err(_) => body,
        };
        Error::Api { status, message }
    }
}

/// Returns the response untouched on success, or the decoded backend error.
pub(crate) async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(Error::from_response(response).await)
    }
}
