//! Failure taxonomy of panel requests and the display-message chain.

use reqwest::StatusCode;
use shared::error::ErrorBody;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    /// The backend answered with a non-2xx status.
    #[error("request failed with status code {}", .status.as_u16())]
    Status {
        endpoint: String,
        status: StatusCode,
        body: Option<ErrorBody>,
    },
    /// The request never produced a complete response.
    #[error("network error calling {endpoint}: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// The response body did not have the expected shape.
    #[error("unexpected response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    pub fn endpoint(&self) -> &str {
        match self {
            Self::Status { endpoint, .. }
            | Self::Transport { endpoint, .. }
            | Self::Decode { endpoint, .. } => endpoint,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport { source, .. } => source.status(),
            Self::Decode { .. } => None,
        }
    }
}

pub type MessageExtractor = fn(&FetchError) -> Option<String>;

/// Tried in order; the first non-blank message wins.
pub const MESSAGE_EXTRACTORS: &[MessageExtractor] = &[detail_message, generic_message];

/// Server-supplied `detail` of a failure body.
pub fn detail_message(err: &FetchError) -> Option<String> {
    match err {
        FetchError::Status {
            body: Some(body), ..
        } => body.detail_message(),
        _ => None,
    }
}

/// Message attached to the failure itself.
pub fn generic_message(err: &FetchError) -> Option<String> {
    Some(err.to_string())
}

/// Derives the text shown to the user for `err`, ending in `fallback` when no
/// extractor yields anything.
pub fn display_message(err: &FetchError, fallback: &str) -> String {
    display_message_with(MESSAGE_EXTRACTORS, err, fallback)
}

pub fn display_message_with(
    extractors: &[MessageExtractor],
    err: &FetchError,
    fallback: &str,
) -> String {
    extractors
        .iter()
        .filter_map(|extract| extract(err))
        .map(|message| message.trim().to_string())
        .find(|message| !message.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}
