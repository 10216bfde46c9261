// Catalyst Center HTTP client
//
// Wraps `reqwest::Client` with controller URL construction, token-header
// injection, and status triage. Endpoint modules (devices, auth) are
// implemented as inherent methods via separate files to keep this module
// focused on transport mechanics.

use std::sync::RwLock;

use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Raw HTTP client for the Catalyst Center REST API.
///
/// Every request carries the session token in the `x-auth-token` header.
/// The client authenticates lazily: callers that never call
/// [`authenticate`](Self::authenticate) themselves get a token on the
/// first request, so the client is usable statelessly.
pub struct CatalystClient {
    http: reqwest::Client,
    base_url: Url,
    username: String,
    password: SecretString,
    /// Cached session token. The controller defines its expiry; we hold
    /// the token until a call comes back 401, then drop it. Single
    /// acquisition point -- nothing else touches the cache.
    token: RwLock<Option<SecretString>>,
}

impl CatalystClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the controller root (e.g. `https://dnac.example.com`);
    /// any trailing slash is tolerated.
    pub fn new(
        base_url: Url,
        username: impl Into<String>,
        password: SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            username: username.into(),
            password,
            token: RwLock::new(None),
        })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    ///
    /// Useful in tests or when sharing a client across consumers.
    pub fn with_client(
        http: reqwest::Client,
        base_url: Url,
        username: impl Into<String>,
        password: SecretString,
    ) -> Self {
        Self {
            http,
            base_url,
            username: username.into(),
            password,
            token: RwLock::new(None),
        }
    }

    /// The controller base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The username used for token exchange.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The underlying HTTP client (for auth flows that need direct access).
    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) fn password(&self) -> &SecretString {
        &self.password
    }

    // ── Token cache ──────────────────────────────────────────────────

    /// Store a freshly obtained session token.
    pub(crate) fn set_token(&self, token: SecretString) {
        debug!("storing session token");
        *self.token.write().expect("token lock poisoned") = Some(token);
    }

    /// Drop the cached token. The next request re-authenticates.
    pub(crate) fn invalidate_token(&self) {
        trace!("invalidating session token");
        *self.token.write().expect("token lock poisoned") = None;
    }

    /// Return the cached token, authenticating first if none is held.
    async fn ensure_token(&self) -> Result<SecretString, Error> {
        if let Some(token) = self.token.read().expect("token lock poisoned").as_ref() {
            return Ok(token.clone());
        }
        self.authenticate().await?;
        self.token
            .read()
            .expect("token lock poisoned")
            .clone()
            .ok_or(Error::Authentication {
                message: "authentication succeeded but no token was stored".into(),
            })
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Build a full URL by joining the base URL and an endpoint path.
    ///
    /// The caller supplies the leading slash, e.g. `/api/v1/network-device`.
    pub(crate) fn endpoint_url(&self, endpoint: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let full = format!("{base}{endpoint}");
        Url::parse(&full).map_err(Error::InvalidUrl)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send an authenticated GET request and return the raw JSON value.
    pub async fn get(&self, endpoint: &str) -> Result<serde_json::Value, Error> {
        self.get_as(endpoint).await
    }

    /// Send an authenticated GET request and deserialize the response.
    ///
    /// A 401 invalidates the cached token before surfacing
    /// [`Error::Authentication`]; the next call re-authenticates. There is
    /// no automatic retry -- the caller decides whether a failed call is
    /// worth repeating.
    pub async fn get_as<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, Error> {
        let url = self.endpoint_url(endpoint)?;
        let token = self.ensure_token().await?;

        debug!("GET {}", url);

        let resp = self
            .http
            .get(url)
            .header("x-auth-token", token.expose_secret())
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            self.invalidate_token();
            return Err(Error::Authentication {
                message: "session token expired or rejected".into(),
            });
        }

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Http {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;
        serde_json::from_str(&body).map_err(|e| {
            let preview = crate::error::body_preview(&body);
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })
    }
}
