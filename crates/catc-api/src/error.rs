use thiserror::Error;

/// Top-level error type for the `catc-api` crate.
///
/// Covers every failure mode the client can hit: authentication,
/// transport, non-2xx controller responses, and malformed payloads.
/// `catc-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Credentials rejected or session token no longer accepted.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// The token endpoint answered 2xx but the body carried no usable
    /// `Token` field. Distinct from HTTP-level auth failures: this is a
    /// protocol-contract violation on the controller side.
    #[error("Token endpoint returned no token (HTTP {status})")]
    MissingToken { status: u16 },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Controller responses ────────────────────────────────────────
    /// Non-2xx response from the controller. Carries the full body so
    /// callers can inspect controller-supplied detail.
    #[error("Controller returned HTTP {status}: {}", body_preview(.body))]
    Http { status: u16, body: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

/// Up to the first 200 bytes of a response body, truncated on a char
/// boundary so multi-byte controller messages never split mid-character.
pub(crate) fn body_preview(body: &str) -> &str {
    let mut end = body.len().min(200);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

impl Error {
    /// Returns `true` if this error indicates the cached token has
    /// expired and re-authentication might resolve it.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Returns `true` if this is a transient error worth retrying.
    ///
    /// The client never retries on its own; callers that want bounded
    /// retry with backoff can branch on this.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Http { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Http { status: 404, .. } => true,
            _ => false,
        }
    }
}
