//! CLI configuration — thin wrapper around `catc_config` shared types.
//!
//! Resolves credentials and transport settings with `GlobalOpts` flag
//! overrides applied (--controller, --username, -k, --ca-cert, --timeout).

use std::time::Duration;

use catc_config::{Credentials, Settings, load_settings_or_default};
use catc_core::{ControllerConfig, TlsMode};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Resolve credentials: CLI flags take priority, the environment fills
/// the rest. The password is environment-only by design.
pub fn resolve_credentials(global: &GlobalOpts) -> Result<Credentials, CliError> {
    Ok(Credentials::resolve(
        global.controller.as_deref(),
        global.username.as_deref(),
    )?)
}

/// Build a `ControllerConfig` from resolved credentials, the settings
/// file, and CLI flag overrides.
pub fn controller_config(global: &GlobalOpts, creds: &Credentials) -> ControllerConfig {
    let settings: Settings = load_settings_or_default();

    // Flags override the settings file. -k forces the insecure mode;
    // --ca-cert implies verification against that bundle.
    let tls = if global.insecure {
        TlsMode::DangerAcceptInvalid
    } else if let Some(ref ca_path) = global.ca_cert {
        TlsMode::CustomCa(ca_path.clone())
    } else if let Some(ref ca_path) = settings.ca_cert {
        TlsMode::CustomCa(ca_path.clone())
    } else if settings.insecure {
        TlsMode::DangerAcceptInvalid
    } else {
        TlsMode::System
    };

    let timeout = Duration::from_secs(global.timeout.unwrap_or(settings.timeout));

    ControllerConfig {
        url: creds.base_url.clone(),
        username: creds.username.clone(),
        password: creds.password.clone(),
        tls,
        timeout,
    }
}
