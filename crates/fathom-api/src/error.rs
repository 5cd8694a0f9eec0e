use thiserror::Error;

/// Top-level error type for the `fathom-api` crate.
///
/// Every failure, local or remote, surfaces as one of these variants.
/// Each carries a human-readable message (via `Display`) and maps to a
/// numeric status through [`Error::status`], so callers can branch on
/// either.
#[derive(Debug, Error)]
pub enum Error {
    // ── Local checks ────────────────────────────────────────────────
    /// Parameters failed schema validation. The message aggregates every
    /// violated constraint.
    #[error("{message}")]
    Validation { message: String },

    /// A required argument (usually an identifier) was missing or blank.
    #[error("{0}")]
    InvalidArgument(String),

    /// The requested API version is not supported by this client.
    #[error("API version '{0}' is not supported")]
    UnsupportedVersion(String),

    /// Base URL or request path could not be turned into a URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Remote failures ─────────────────────────────────────────────
    /// The API rejected the token (HTTP 401).
    #[error("Authentication error: please check your API token")]
    Authentication,

    /// Any other non-2xx response.
    #[error("{message}")]
    Api { message: String, status: u16 },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not the JSON we expected.
    #[error("Request failed: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Status used for locally detected bad input.
    pub const BAD_REQUEST: u16 = 400;
    /// Status used when the failure happened before a response was read.
    pub const INTERNAL: u16 = 500;

    /// Numeric status code for programmatic branching.
    ///
    /// Remote failures report the HTTP status; local failures use
    /// [`BAD_REQUEST`](Self::BAD_REQUEST); transport and decode failures use
    /// [`INTERNAL`](Self::INTERNAL).
    pub fn status(&self) -> u16 {
        match self {
            Self::Validation { .. }
            | Self::InvalidArgument(_)
            | Self::UnsupportedVersion(_)
            | Self::InvalidUrl(_) => Self::BAD_REQUEST,
            Self::Authentication => 401,
            Self::Api { status, .. } => *status,
            Self::Transport(_) | Self::Deserialization { .. } => Self::INTERNAL,
        }
    }

    /// Returns `true` if the token was rejected.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::Authentication)
    }

    /// Returns `true` if this is a "not found" response.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }

    /// Returns `true` if the request never left the process because its
    /// parameters were rejected.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    pub(crate) fn missing_id(kind: &str) -> Self {
        Self::InvalidArgument(format!("{kind} ID is required"))
    }
}
