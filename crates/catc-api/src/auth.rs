// Token exchange
//
// Catalyst Center issues a bearer token in exchange for HTTP Basic Auth
// against a fixed endpoint. The token has a controller-defined expiry;
// the client caches it until a request comes back 401.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::debug;

use crate::client::CatalystClient;
use crate::error::Error;

/// Path of the token endpoint, relative to the controller base URL.
pub const AUTH_TOKEN_PATH: &str = "/dna/system/api/v1/auth/token";

/// Token endpoint response body. `Token` is the documented field name;
/// it is optional here so a 200 without it can be reported as a
/// contract violation rather than a decode failure.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(rename = "Token")]
    token: Option<String>,
}

impl CatalystClient {
    /// Exchange the configured credentials for a session token.
    ///
    /// `POST /dna/system/api/v1/auth/token` with HTTP Basic Auth. On
    /// success the token is stored in the client's cache and used for all
    /// subsequent requests. Rejected credentials surface as
    /// [`Error::Authentication`]; a 2xx response without a usable `Token`
    /// field is the distinct [`Error::MissingToken`]. An empty token is
    /// never returned silently.
    pub async fn authenticate(&self) -> Result<(), Error> {
        let url = self.endpoint_url(AUTH_TOKEN_PATH)?;

        debug!("requesting token at {}", url);

        let resp = self
            .http()
            .post(url)
            .basic_auth(self.username(), Some(self.password().expose_secret()))
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();

        if status == reqwest::StatusCode::UNAUTHORIZED
            || status == reqwest::StatusCode::FORBIDDEN
        {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Authentication {
                message: format!("credentials rejected (HTTP {status}): {body}"),
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
        let parsed: TokenResponse = serde_json::from_str(&body).map_err(|e| {
            let preview = crate::error::body_preview(&body);
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })?;

        match parsed.token {
            Some(token) if !token.is_empty() => {
                self.set_token(SecretString::from(token));
                debug!("token obtained");
                Ok(())
            }
            _ => Err(Error::MissingToken {
                status: status.as_u16(),
            }),
        }
    }
}
