//! Error types for the core module.

use std::fmt;

/// Setup error raised while binding a widget to its endpoint and regions.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Endpoint is not a valid URL.
    #[error("invalid endpoint `{endpoint}`: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    /// The surface has no region for the given locator.
    #[error("display region `{0}` not found")]
    MissingRegion(String),

    /// HTTP client could not be built.
    #[error("http client error: {0}")]
    Client(#[from] reqwest::Error),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Maximum number of body characters quoted in an unexpected content type error.
pub const BODY_SNIPPET_LEN: usize = 100;

/// Failure of a single counter request.
///
/// Every variant is caught at the widget boundary and rendered into the
/// message region; none of them escape to the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// Transport-level failure (DNS, connection refused, offline).
    #[error("{0}")]
    Network(String),

    /// Response was not declared as JSON. Takes precedence over the status.
    #[error("expected JSON but got: {snippet}")]
    UnexpectedContentType { snippet: String },

    /// Non-success status with a JSON-declared body.
    #[error("HTTP error, status: {status}")]
    Http { status: u16 },

    /// JSON body is invalid or its `count` is not a non-negative integer.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl FetchError {
    /// Classify the failure.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Network(_) => FailureKind::NetworkError,
            Self::UnexpectedContentType { .. } => FailureKind::UnexpectedContentType,
            Self::Http { .. } => FailureKind::HttpError,
            Self::MalformedResponse(_) => FailureKind::MalformedResponse,
        }
    }

    /// Build an [`FetchError::UnexpectedContentType`] quoting the start of `body`.
    #[must_use]
    pub fn unexpected_content_type(body: &str) -> Self {
        Self::UnexpectedContentType {
            snippet: body.chars().take(BODY_SNIPPET_LEN).collect(),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(error_chain(&err))
    }
}

/// Render an error followed by each of its sources, `outer: inner: root`.
///
/// A source whose text is already part of the rendered message is skipped.
#[must_use]
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();

    while let Some(cause) = source {
        let text = cause.to_string();
        if !text.is_empty() && !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }

    message
}

/// Kind of a [`FetchError`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum FailureKind {
    NetworkError,
    UnexpectedContentType,
    HttpError,
    MalformedResponse,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NetworkError => "NetworkError",
            Self::UnexpectedContentType => "UnexpectedContentType",
            Self::HttpError => "HttpError",
            Self::MalformedResponse => "MalformedResponse",
        };
        f.write_str(name)
    }
}
