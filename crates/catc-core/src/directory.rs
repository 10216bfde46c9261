// Device directory service
//
// Fetches the managed-device list through the API client and exposes it
// as a `DeviceDirectory` value. The directory is fetched fresh per call
// and never cached across invocations; family filtering produces a new
// directory without touching the source.

use std::time::Duration;

use secrecy::SecretString;
use tracing::info;
use url::Url;

use catc_api::{CatalystClient, DeviceListEnvelope, DeviceRecord, TlsMode, TransportConfig};

use crate::error::CoreError;

// ── Configuration ────────────────────────────────────────────────────

/// Everything needed to reach a controller.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    pub url: Url,
    pub username: String,
    pub password: SecretString,
    pub tls: TlsMode,
    pub timeout: Duration,
}

// ── Directory value ──────────────────────────────────────────────────

/// An ordered snapshot of the controller's managed devices, plus the
/// envelope metadata the controller returned alongside them.
#[derive(Debug, Clone)]
pub struct DeviceDirectory {
    pub devices: Vec<DeviceRecord>,
    pub version: Option<String>,
}

impl From<DeviceListEnvelope> for DeviceDirectory {
    fn from(envelope: DeviceListEnvelope) -> Self {
        Self {
            devices: envelope.response,
            version: envelope.version,
        }
    }
}

impl DeviceDirectory {
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DeviceRecord> {
        self.devices.iter()
    }

    /// A new directory holding only devices whose family case-insensitively
    /// equals `family`, in the original relative order. `self` is untouched.
    pub fn filter_family(&self, family: &str) -> Self {
        Self {
            devices: self
                .devices
                .iter()
                .filter(|d| d.family_matches(family))
                .cloned()
                .collect(),
            version: self.version.clone(),
        }
    }
}

// ── Service ──────────────────────────────────────────────────────────

/// Wraps the API client with user-facing errors.
pub struct DirectoryService {
    client: CatalystClient,
}

impl DirectoryService {
    /// Build a service (and its HTTP client) from a `ControllerConfig`.
    pub fn new(config: ControllerConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            tls: config.tls,
            timeout: config.timeout,
        };
        let client =
            CatalystClient::new(config.url, config.username, config.password, &transport)?;
        Ok(Self { client })
    }

    /// Wrap an existing client (shared token cache).
    pub fn with_client(client: CatalystClient) -> Self {
        Self { client }
    }

    /// The underlying client, for callers that need other endpoints.
    pub fn client(&self) -> &CatalystClient {
        &self.client
    }

    /// Fetch the device directory, optionally filtered by family.
    pub async fn fetch(&self, family: Option<&str>) -> Result<DeviceDirectory, CoreError> {
        let envelope = self.client.list_devices(family).await?;
        let directory = DeviceDirectory::from(envelope);
        info!(devices = directory.len(), "fetched device directory");
        Ok(directory)
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Build a directory from inline JSON records (shared by the
    /// transformer tests).
    pub(crate) fn directory(records: serde_json::Value) -> DeviceDirectory {
        let devices: Vec<DeviceRecord> =
            serde_json::from_value(records).expect("valid test records");
        DeviceDirectory {
            devices,
            version: Some("1.0".into()),
        }
    }

    #[test]
    fn filter_family_is_order_preserving_and_non_mutating() {
        let dir = directory(serde_json::json!([
            {"id": "1", "hostname": "R1", "family": "Routers"},
            {"id": "2", "hostname": "SW1", "family": "Switches and Hubs"},
            {"id": "3", "hostname": "R2", "family": "Routers"}
        ]));

        let routers = dir.filter_family("ROUTERS");
        let hostnames: Vec<_> = routers
            .iter()
            .map(|d| d.hostname.as_deref().expect("hostname"))
            .collect();
        assert_eq!(hostnames, ["R1", "R2"]);
        assert_eq!(routers.version.as_deref(), Some("1.0"));

        // Source untouched.
        assert_eq!(dir.len(), 3);
    }

    #[test]
    fn filter_family_skips_records_without_family() {
        let dir = directory(serde_json::json!([
            {"id": "1", "hostname": "R1", "family": "Routers"},
            {"id": "2", "hostname": "X1"}
        ]));
        assert_eq!(dir.filter_family("Routers").len(), 1);
    }
}
