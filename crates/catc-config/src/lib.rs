//! Shared configuration for the Catalyst Center tools.
//!
//! Credential resolution from the environment (`DNAC_BURL`, `DNAC_USER`,
//! `DNAC_PASS`) plus an optional TOML settings file for transport
//! options. Every consumer of the controller goes through
//! [`Credentials::from_env`] so the required-variable contract is
//! defined in exactly one place.

use std::path::PathBuf;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Environment variable holding the controller base URL.
pub const ENV_BASE_URL: &str = "DNAC_BURL";
/// Environment variable holding the controller username.
pub const ENV_USERNAME: &str = "DNAC_USER";
/// Environment variable holding the controller password.
pub const ENV_PASSWORD: &str = "DNAC_PASS";
/// Optional override for the device-login username.
pub const ENV_DEVICE_USERNAME: &str = "DNAC_DEVICE_USER";
/// Optional override for the device-login password.
pub const ENV_DEVICE_PASSWORD: &str = "DNAC_DEVICE_PASS";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    /// One or more required environment variables are unset or empty.
    /// All missing names are reported at once so the operator can fix
    /// every gap in one pass.
    #[error("missing required environment variables: {}", .missing.join(", "))]
    MissingEnv { missing: Vec<String> },

    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize settings: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("settings loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Credentials ─────────────────────────────────────────────────────

/// Resolved controller credentials plus the device-login slots.
///
/// The device slots default to the controller credentials -- the
/// deployments this tool targets reuse them for SSH login -- but they
/// are distinct fields so the two can diverge via
/// `DNAC_DEVICE_USER` / `DNAC_DEVICE_PASS`.
///
/// Passwords are held as [`SecretString`] and never appear in `Debug`
/// output or logs.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Controller base URL, trailing slash trimmed.
    pub base_url: Url,
    pub username: String,
    pub password: SecretString,
    pub device_username: String,
    pub device_password: SecretString,
}

impl Credentials {
    /// Resolve credentials from the process environment.
    ///
    /// Reads `DNAC_BURL`, `DNAC_USER` and `DNAC_PASS`. A variable that is
    /// unset or empty counts as missing; when any are missing the error
    /// names all of them. A malformed base URL is a distinct validation
    /// error.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::resolve(None, None)
    }

    /// Resolve credentials, letting a caller (CLI flags) override the
    /// base URL and username. The password is always environment-only.
    /// Missing-variable reporting covers whatever is still unresolved
    /// after overrides.
    pub fn resolve(
        base_url_override: Option<&str>,
        username_override: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let base_url = base_url_override
            .map(ToOwned::to_owned)
            .or_else(|| non_empty_var(ENV_BASE_URL));
        let username = username_override
            .map(ToOwned::to_owned)
            .or_else(|| non_empty_var(ENV_USERNAME));
        let password = non_empty_var(ENV_PASSWORD);

        let missing: Vec<String> = [
            (ENV_BASE_URL, &base_url),
            (ENV_USERNAME, &username),
            (ENV_PASSWORD, &password),
        ]
        .iter()
        .filter(|(_, value)| value.is_none())
        .map(|(name, _)| (*name).to_owned())
        .collect();

        if !missing.is_empty() {
            return Err(ConfigError::MissingEnv { missing });
        }

        // Checked above -- all three are Some.
        let base_url = base_url.unwrap_or_default();
        let username = username.unwrap_or_default();
        let password = password.unwrap_or_default();

        let base_url = parse_base_url(&base_url)?;

        let device_username = non_empty_var(ENV_DEVICE_USERNAME).unwrap_or_else(|| username.clone());
        let device_password = non_empty_var(ENV_DEVICE_PASSWORD).unwrap_or_else(|| password.clone());

        Ok(Self {
            base_url,
            username,
            password: SecretString::from(password),
            device_username,
            device_password: SecretString::from(device_password),
        })
    }

    /// Build credentials from explicit values (CLI flag overrides).
    /// Device slots fall back to the controller credentials.
    pub fn new(
        base_url: &str,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let username = username.into();
        let password = password.into();
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            device_username: username.clone(),
            device_password: SecretString::from(password.clone()),
            username,
            password: SecretString::from(password),
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim_end_matches('/');
    trimmed.parse().map_err(|_| ConfigError::Validation {
        field: ENV_BASE_URL.into(),
        reason: format!("invalid URL: {raw}"),
    })
}

// ── Settings file ───────────────────────────────────────────────────

/// Transport settings from the TOML settings file and `DNAC_`-prefixed
/// environment variables. Credentials never live here.
#[derive(Debug, Deserialize, Serialize)]
pub struct Settings {
    /// Accept self-signed controller certificates. Defaults to true --
    /// the target environment uses them -- but is an explicit switch,
    /// not a hardcoded bypass.
    #[serde(default = "default_insecure")]
    pub insecure: bool,

    /// Path to a custom CA certificate (PEM). Takes effect when
    /// `insecure` is false.
    pub ca_cert: Option<PathBuf>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            insecure: default_insecure(),
            ca_cert: None,
            timeout: default_timeout(),
        }
    }
}

fn default_insecure() -> bool {
    true
}
fn default_timeout() -> u64 {
    30
}

/// Resolve the settings file path via XDG / platform conventions.
pub fn settings_path() -> PathBuf {
    ProjectDirs::from("com", "na-tools", "catc").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("settings.toml");
            p
        },
        |dirs| dirs.config_dir().join("settings.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("catc");
    p
}

/// Load settings from file + environment.
pub fn load_settings() -> Result<Settings, ConfigError> {
    load_settings_from(&settings_path())
}

/// Load settings from an explicit file path (for tests).
pub fn load_settings_from(path: &PathBuf) -> Result<Settings, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Settings::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("DNAC_").only(&["insecure", "ca_cert", "timeout"]));

    let settings: Settings = figment.extract()?;
    Ok(settings)
}

/// Load settings, returning defaults if the file doesn't exist.
pub fn load_settings_or_default() -> Settings {
    load_settings().unwrap_or_default()
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    const ALL_VARS: [&str; 5] = [
        ENV_BASE_URL,
        ENV_USERNAME,
        ENV_PASSWORD,
        ENV_DEVICE_USERNAME,
        ENV_DEVICE_PASSWORD,
    ];

    fn with_env<F: FnOnce()>(vars: &[(&str, Option<&str>)], f: F) {
        let mut full: Vec<(String, Option<String>)> = ALL_VARS
            .iter()
            .map(|name| ((*name).to_owned(), None))
            .collect();
        for (name, value) in vars {
            if let Some(slot) = full.iter_mut().find(|(n, _)| n == name) {
                slot.1 = value.map(ToOwned::to_owned);
            }
        }
        temp_env::with_vars(full, f);
    }

    #[test]
    fn resolves_complete_environment() {
        with_env(
            &[
                (ENV_BASE_URL, Some("https://dnac.example.com/")),
                (ENV_USERNAME, Some("netops")),
                (ENV_PASSWORD, Some("hunter2")),
            ],
            || {
                let creds = Credentials::from_env().expect("complete env");
                assert_eq!(creds.base_url.as_str(), "https://dnac.example.com/");
                assert_eq!(creds.username, "netops");
                assert_eq!(creds.password.expose_secret(), "hunter2");
                // Device slots default to the controller credentials.
                assert_eq!(creds.device_username, "netops");
                assert_eq!(creds.device_password.expose_secret(), "hunter2");
            },
        );
    }

    #[test]
    fn missing_password_names_only_that_variable() {
        with_env(
            &[
                (ENV_BASE_URL, Some("https://dnac.example.com")),
                (ENV_USERNAME, Some("netops")),
            ],
            || {
                let err = Credentials::from_env().expect_err("missing DNAC_PASS");
                let message = err.to_string();
                assert!(message.contains("DNAC_PASS"), "got: {message}");
                assert!(!message.contains("DNAC_USER"), "got: {message}");
                assert!(!message.contains("DNAC_BURL"), "got: {message}");
            },
        );
    }

    #[test]
    fn all_missing_variables_reported_at_once() {
        with_env(&[], || {
            let err = Credentials::from_env().expect_err("empty env");
            match err {
                ConfigError::MissingEnv { missing } => {
                    assert_eq!(missing, ["DNAC_BURL", "DNAC_USER", "DNAC_PASS"]);
                }
                other => panic!("expected MissingEnv, got: {other}"),
            }
        });
    }

    #[test]
    fn empty_value_counts_as_missing() {
        with_env(
            &[
                (ENV_BASE_URL, Some("https://dnac.example.com")),
                (ENV_USERNAME, Some("")),
                (ENV_PASSWORD, Some("pw")),
            ],
            || {
                let err = Credentials::from_env().expect_err("empty DNAC_USER");
                assert!(err.to_string().contains("DNAC_USER"));
            },
        );
    }

    #[test]
    fn overrides_take_priority_over_env() {
        with_env(
            &[
                (ENV_BASE_URL, Some("https://env.example.com")),
                (ENV_USERNAME, Some("env-user")),
                (ENV_PASSWORD, Some("pw")),
            ],
            || {
                let creds =
                    Credentials::resolve(Some("https://flag.example.com"), Some("flag-user"))
                        .expect("resolve");
                assert_eq!(creds.base_url.as_str(), "https://flag.example.com/");
                assert_eq!(creds.username, "flag-user");
            },
        );
    }

    #[test]
    fn override_does_not_satisfy_missing_password() {
        with_env(&[], || {
            let err = Credentials::resolve(Some("https://flag.example.com"), Some("flag-user"))
                .expect_err("password still missing");
            match err {
                ConfigError::MissingEnv { missing } => assert_eq!(missing, ["DNAC_PASS"]),
                other => panic!("expected MissingEnv, got: {other}"),
            }
        });
    }

    #[test]
    fn device_slots_can_diverge() {
        with_env(
            &[
                (ENV_BASE_URL, Some("https://dnac.example.com")),
                (ENV_USERNAME, Some("netops")),
                (ENV_PASSWORD, Some("controller-pw")),
                (ENV_DEVICE_USERNAME, Some("ssh-user")),
                (ENV_DEVICE_PASSWORD, Some("ssh-pw")),
            ],
            || {
                let creds = Credentials::from_env().expect("complete env");
                assert_eq!(creds.username, "netops");
                assert_eq!(creds.device_username, "ssh-user");
                assert_eq!(creds.device_password.expose_secret(), "ssh-pw");
            },
        );
    }

    #[test]
    fn invalid_base_url_is_a_validation_error() {
        with_env(
            &[
                (ENV_BASE_URL, Some("not a url")),
                (ENV_USERNAME, Some("netops")),
                (ENV_PASSWORD, Some("pw")),
            ],
            || {
                let err = Credentials::from_env().expect_err("bad URL");
                assert!(matches!(err, ConfigError::Validation { .. }));
            },
        );
    }

    #[test]
    fn debug_output_hides_password() {
        let creds =
            Credentials::new("https://dnac.example.com", "netops", "hunter2").expect("valid");
        let debug = format!("{creds:?}");
        assert!(!debug.contains("hunter2"), "password leaked: {debug}");
    }

    #[test]
    fn settings_defaults() {
        let settings = Settings::default();
        assert!(settings.insecure);
        assert_eq!(settings.timeout, 30);
        assert!(settings.ca_cert.is_none());
    }

    #[test]
    fn settings_load_from_toml_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "insecure = false\ntimeout = 10\n").expect("write");

        temp_env::with_vars(
            [
                ("DNAC_INSECURE", None::<&str>),
                ("DNAC_TIMEOUT", None),
                ("DNAC_CA_CERT", None),
            ],
            || {
                let settings = load_settings_from(&path).expect("load");
                assert!(!settings.insecure);
                assert_eq!(settings.timeout, 10);
            },
        );
    }
}
