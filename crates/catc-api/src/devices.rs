// Device-list endpoint
//
// A single synchronous fetch is assumed to return the complete set; the
// target environment holds hundreds of devices, not millions, so no
// pagination is attempted.

use tracing::debug;

use crate::client::CatalystClient;
use crate::error::Error;
use crate::models::DeviceListEnvelope;

/// Path of the device-list endpoint.
pub const NETWORK_DEVICE_PATH: &str = "/api/v1/network-device";

impl CatalystClient {
    /// Fetch the managed-device list.
    ///
    /// `GET /api/v1/network-device`. When `family` is given, only records
    /// whose `family` field case-insensitively equals it are retained,
    /// preserving the controller's original relative order.
    pub async fn list_devices(
        &self,
        family: Option<&str>,
    ) -> Result<DeviceListEnvelope, Error> {
        debug!(?family, "listing devices");
        let mut envelope: DeviceListEnvelope = self.get_as(NETWORK_DEVICE_PATH).await?;
        if let Some(family) = family {
            envelope
                .response
                .retain(|dev| dev.family_matches(family));
        }
        Ok(envelope)
    }
}
