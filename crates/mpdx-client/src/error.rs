//! Error types for import persistence and the wizard session.

use mpdx_model::{FieldId, ModelError};
use thiserror::Error;

/// Errors raised while loading, uploading, or saving an import.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
    /// `save` was called before both snapshots were loaded.
    #[error("cannot save import: {missing} snapshot is missing")]
    IncompleteData {
        /// Which snapshot was absent (`initial` or `upload`).
        missing: &'static str,
    },

    /// The API answered with a non-success status.
    #[error("import API error ({status}): {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body, as text.
        body: String,
    },

    /// The request never got a response.
    #[error("network error: {0}")]
    Network(String),

    /// The response body was not the expected JSON:API document.
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// Reading the file to upload failed.
    #[error("I/O error: {0}")]
    Io(String),

    /// Invalid client configuration (base URL, token).
    #[error("invalid client configuration: {0}")]
    Config(String),

    /// Required headers are not mapped yet.
    #[error("required headers not mapped: {}", join_fields(.0))]
    MissingRequiredHeaders(Vec<FieldId>),

    /// The wizard cannot perform this action in its current step.
    #[error("invalid wizard state: {0}")]
    InvalidState(String),

    /// Rejected edit on the snapshot.
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl ClientError {
    /// True for failures reported by, or on the way to, the import API.
    #[must_use]
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            Self::Http { .. } | Self::Network(_) | Self::JsonParse(_)
        )
    }

    /// Whether trying again unchanged may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Http { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    /// Short message suitable for showing to the person running the import.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::IncompleteData { .. } => "Upload a file before saving the import.",
            Self::Http { status: 401 | 403, .. } => "You are not allowed to update this import.",
            Self::Http { status: 404, .. } => "The import could not be found.",
            Self::Http { .. } | Self::JsonParse(_) => "The server could not save the import.",
            Self::Network(_) => "Could not reach the server. Please check your connection.",
            Self::Io(_) => "The file could not be read.",
            Self::Config(_) => "The API settings are invalid.",
            Self::MissingRequiredHeaders(_) => "Map every required header before continuing.",
            Self::InvalidState(_) | Self::Model(_) => "That change is not possible right now.",
        }
    }
}

fn join_fields(fields: &[FieldId]) -> String {
    fields
        .iter()
        .map(FieldId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::JsonParse(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Http {
                status: status.as_u16(),
                body: err.to_string(),
            }
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonParse(err.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
