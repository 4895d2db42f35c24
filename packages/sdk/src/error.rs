//! Error types for the SNAI client.
//!
//! There are two kinds of failure. A [`ValidationError`] is raised locally,
//! before any request is built. A [`RemoteError`] covers everything that
//! happens once a request is on its way: error statuses, connection
//! failures, timeouts and undecodable bodies.
//!
//! [`Error::Encode`] exists only so body serialisation never has to panic;
//! the request types in `snai-api` always encode.

use thiserror::Error;

/// A caller-side mistake detected before contacting the network.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("API key is required. Register at https://snai.network")]
    MissingApiKey,

    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    #[error("post id is required")]
    MissingPostId,

    #[error("direction must be 1 (upvote) or -1 (downvote), got {0}")]
    InvalidDirection(i64),
}

/// A failure reported by, or while talking to, the network.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RemoteError {
    /// Error status whose body carried an `error` message.
    #[error("{message}")]
    Api {
        status: u16,
        message: String,
        hint: Option<String>,
    },

    /// Error status whose body was not an error envelope.
    #[error("HTTP {status}{}", body_suffix(.body))]
    Status { status: u16, body: String },

    /// The request never produced a response (connect failure, timeout).
    #[error("request failed: {0}")]
    Transport(String),

    /// A 2xx response whose body could not be decoded.
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl RemoteError {
    /// The HTTP status, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            RemoteError::Api { status, .. } | RemoteError::Status { status, .. } => Some(*status),
            RemoteError::Transport(_) | RemoteError::Decode(_) => None,
        }
    }
}

fn body_suffix(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!(": {body}")
    }
}

/// Any failure returned by the SDK.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// A request body could not be serialised as a JSON object.
    #[error("failed to encode request body: {0}")]
    Encode(String),
}

pub type Result<T> = std::result::Result<T, Error>;
