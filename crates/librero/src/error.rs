//! CLI error types with miette diagnostics.
//!
//! Maps `librero_api::Error` variants into user-facing errors with
//! actionable help text and stable exit codes.

use librero_config::ConfigError;
use miette::Diagnostic;
use thiserror::Error;

/// Exit codes for process termination.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not connect to server at {url}")]
    #[diagnostic(
        code(librero::connection_failed),
        help(
            "Check that the book server is running and accessible.\n\
             URL: {url}\n\
             Override it with --server or LIBRERO_SERVER_URL."
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Request to {url} timed out")]
    #[diagnostic(
        code(librero::timeout),
        help("Increase the timeout with --timeout or check server responsiveness.")
    )]
    Timeout { url: String },

    // ── Resources ────────────────────────────────────────────────────

    #[error("Book {id} not found")]
    #[diagnostic(
        code(librero::not_found),
        help("Run: librero list to see available books")
    )]
    NotFound { id: i64 },

    // ── API ──────────────────────────────────────────────────────────

    #[error("Server error ({status}): {message}")]
    #[diagnostic(code(librero::api_error))]
    Api { status: u16, message: String },

    #[error("Unexpected response from server: {message}")]
    #[diagnostic(
        code(librero::bad_response),
        help("The server answered but the payload was not the expected JSON.")
    )]
    BadResponse { message: String },

    // ── Validation / configuration ───────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(librero::validation))]
    Validation { field: String, reason: String },

    #[error(transparent)]
    #[diagnostic(code(librero::config))]
    Config(#[from] ConfigError),

    // ── IO ───────────────────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::Config(ConfigError::Validation { .. }) => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }

    /// Attach the server URL when converting a transport error.
    pub fn from_api(err: librero_api::Error, base_url: &url::Url) -> Self {
        match err {
            librero_api::Error::NotFound { id } => Self::NotFound { id },
            librero_api::Error::Api { status, message } => Self::Api { status, message },
            librero_api::Error::Deserialization { message, .. } => Self::BadResponse { message },
            librero_api::Error::InvalidUrl(e) => Self::Validation {
                field: "server".into(),
                reason: e.to_string(),
            },
            librero_api::Error::Transport(e) => {
                let url = e
                    .url()
                    .map_or_else(|| base_url.to_string(), ToString::to_string);
                if e.is_timeout() {
                    Self::Timeout { url }
                } else {
                    Self::ConnectionFailed {
                        url,
                        source: e.into(),
                    }
                }
            }
        }
    }
}
