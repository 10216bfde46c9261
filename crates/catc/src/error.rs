//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use catc_config::ConfigError;
use catc_core::CoreError;

/// Exit codes: directory-level failures are fatal and non-zero.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Configuration ────────────────────────────────────────────────

    #[error("Missing required configuration: {missing}")]
    #[diagnostic(
        code(catc::missing_config),
        help(
            "Set the listed environment variables (or pass --controller / --username).\n\
             A .env-style shell export works:\n\
             export DNAC_BURL=https://dnac.example.com DNAC_USER=admin DNAC_PASS=..."
        )
    )]
    MissingConfig { missing: String },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(catc::validation))]
    Validation { field: String, reason: String },

    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not connect to controller at {url}")]
    #[diagnostic(
        code(catc::connection_failed),
        help(
            "Check that the controller is running and accessible.\n\
             URL: {url}"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(catc::timeout),
        help("Increase the timeout with --timeout or check controller responsiveness.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(catc::auth_failed),
        help(
            "Verify DNAC_USER / DNAC_PASS and that the account has API access.\n\
             Tokens expire server-side; a stale session is retried automatically\n\
             on the next invocation."
        )
    )]
    AuthFailed { message: String },

    // ── API ──────────────────────────────────────────────────────────

    #[error("Controller API error: {message}")]
    #[diagnostic(code(catc::api_error))]
    ApiError {
        message: String,
        status: Option<u16>,
    },

    #[error("Unexpected controller response: {message}")]
    #[diagnostic(
        code(catc::decode_error),
        help("The controller answered with a payload this tool does not understand.")
    )]
    DecodeError { message: String },

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize output: {0}")]
    #[diagnostic(code(catc::yaml))]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to write CSV: {0}")]
    #[diagnostic(code(catc::csv))]
    Csv(#[from] csv::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingConfig { .. } | Self::Validation { .. } => exit_code::USAGE,
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            _ => exit_code::GENERAL,
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::MissingEnv { missing } => CliError::MissingConfig {
                missing: missing.join(", "),
            },
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            other => CliError::Validation {
                field: "configuration".into(),
                reason: other.to_string(),
            },
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => {
                CliError::ConnectionFailed { url, reason }
            }
            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },
            CoreError::Timeout => CliError::Timeout,
            CoreError::Api { message, status } => CliError::ApiError { message, status },
            CoreError::Decode { message } => CliError::DecodeError { message },
            CoreError::Config { message } => CliError::Validation {
                field: "configuration".into(),
                reason: message,
            },
        }
    }
}
