// ── Core error types ──
//
// User-facing errors from catc-core. Consumers never see raw reqwest
// errors or JSON parse failures directly; the `From<catc_api::Error>`
// impl translates transport-layer errors into domain-appropriate
// variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to controller at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Controller request timed out")]
    Timeout,

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("Controller API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Unexpected controller response: {message}")]
    Decode { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<catc_api::Error> for CoreError {
    fn from(err: catc_api::Error) -> Self {
        match err {
            catc_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            catc_api::Error::MissingToken { status } => CoreError::AuthenticationFailed {
                message: format!(
                    "token endpoint answered HTTP {status} without a Token field"
                ),
            },
            catc_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(|u| u.to_string())
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            catc_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            catc_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            catc_api::Error::Http { status, body } => CoreError::Api {
                message: format!("HTTP {status}: {}", body_preview(&body)),
                status: Some(status),
            },
            catc_api::Error::Deserialization { message, body: _ } => {
                CoreError::Decode { message }
            }
        }
    }
}

/// Up to the first 200 bytes of a response body, truncated on a char
/// boundary.
fn body_preview(body: &str) -> &str {
    let mut end = body.len().min(200);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_token_maps_to_auth_failure() {
        let core: CoreError = catc_api::Error::MissingToken { status: 200 }.into();
        assert!(matches!(core, CoreError::AuthenticationFailed { .. }));
    }

    #[test]
    fn http_error_with_multibyte_body_maps_cleanly() {
        let core: CoreError = catc_api::Error::Http {
            status: 500,
            body: "€".repeat(100),
        }
        .into();
        match core {
            CoreError::Api { status, message } => {
                assert_eq!(status, Some(500));
                assert!(message.contains('€'));
            }
            other => panic!("expected Api, got: {other}"),
        }
    }

    #[test]
    fn http_error_keeps_status() {
        let core: CoreError = catc_api::Error::Http {
            status: 502,
            body: "bad gateway".into(),
        }
        .into();
        match core {
            CoreError::Api { status, message } => {
                assert_eq!(status, Some(502));
                assert!(message.contains("bad gateway"));
            }
            other => panic!("expected Api, got: {other}"),
        }
    }
}
