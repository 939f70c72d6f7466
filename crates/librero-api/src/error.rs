use thiserror::Error;

/// Top-level error type for the `librero-api` crate.
///
/// Covers every failure mode of the book server client: transport,
/// URL construction, missing entities, non-2xx responses, and bad
/// payloads. Callers that only care about "failed" can treat every
/// variant uniformly; the CLI maps the variants into diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The server reported no book with the requested id.
    #[error("Book {id} not found")]
    NotFound { id: i64 },

    /// Non-2xx response with a truncated body preview.
    #[error("Server error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Api { status, .. } => *status == 404,
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            _ => false,
        }
    }
}
