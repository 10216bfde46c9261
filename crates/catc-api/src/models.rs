// Catalyst Center response types
//
// Models for the `/api/v1/network-device` payload. Fields use
// `#[serde(default)]` liberally because the controller is inconsistent
// about field presence across device families and software versions; a
// record missing a field degrades to a default rather than failing the
// whole batch.

use serde::{Deserialize, Serialize};

// ── Response envelope ────────────────────────────────────────────────

/// Device-list envelope: `{ "response": [...], "version": "1.0" }`.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceListEnvelope {
    #[serde(default)]
    pub response: Vec<DeviceRecord>,
    #[serde(default)]
    pub version: Option<String>,
}

// ── Device record ────────────────────────────────────────────────────

/// A managed device as reported by the controller.
///
/// The API returns 40+ fields per device; the ones downstream tools use
/// are modeled explicitly and everything else lands in `extra`. Only
/// `id` is required -- every other field may be absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub management_ip_address: Option<String>,
    /// Coarse device category, e.g. "Routers" or "Switches and Hubs".
    #[serde(default)]
    pub family: Option<String>,
    /// Software identifier, e.g. "IOS-XE".
    #[serde(default)]
    pub software_type: Option<String>,
    #[serde(default)]
    pub software_version: Option<String>,
    #[serde(default)]
    pub reachability_status: Option<String>,
    #[serde(default)]
    pub platform_id: Option<String>,
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub mac_address: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl DeviceRecord {
    /// The unique key for this device: hostname when present and
    /// non-empty, else the controller-assigned id. Hostname is preferred
    /// because it is human-meaningful; the id guarantees every device
    /// gets some key.
    pub fn key(&self) -> &str {
        match self.hostname.as_deref() {
            Some(h) if !h.is_empty() => h,
            _ => &self.id,
        }
    }

    /// Inventory group name: `family` lower-cased with spaces replaced
    /// by underscores, or `"ungrouped"` when family is absent or empty.
    pub fn group_name(&self) -> String {
        match self.family.as_deref() {
            Some(f) if !f.is_empty() => f.replace(' ', "_").to_lowercase(),
            _ => "ungrouped".into(),
        }
    }

    /// Normalized OS identifier: `softwareType` with hyphens removed,
    /// lower-cased, defaulting to `"iosxe"`.
    pub fn network_os(&self) -> String {
        match self.software_type.as_deref() {
            Some(s) if !s.is_empty() => s.replace('-', "").to_lowercase(),
            _ => "iosxe".into(),
        }
    }

    /// Test-bed device type: lower-cased `family`, defaulting to
    /// `"router"`.
    pub fn device_type(&self) -> String {
        match self.family.as_deref() {
            Some(f) if !f.is_empty() => f.to_lowercase(),
            _ => "router".into(),
        }
    }

    /// Case-insensitive exact match on the `family` field.
    pub fn family_matches(&self, family: &str) -> bool {
        self.family
            .as_deref()
            .is_some_and(|f| f.eq_ignore_ascii_case(family))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(json: serde_json::Value) -> DeviceRecord {
        serde_json::from_value(json).expect("valid record")
    }

    #[test]
    fn key_prefers_hostname_over_id() {
        let dev = record(serde_json::json!({"id": "abc", "hostname": "R1"}));
        assert_eq!(dev.key(), "R1");

        let dev = record(serde_json::json!({"id": "abc"}));
        assert_eq!(dev.key(), "abc");

        let dev = record(serde_json::json!({"id": "abc", "hostname": ""}));
        assert_eq!(dev.key(), "abc");
    }

    #[test]
    fn group_name_normalizes_family() {
        let dev = record(serde_json::json!({"id": "1", "family": "Switches and Hubs"}));
        assert_eq!(dev.group_name(), "switches_and_hubs");

        let dev = record(serde_json::json!({"id": "1"}));
        assert_eq!(dev.group_name(), "ungrouped");
    }

    #[test]
    fn network_os_defaults_to_iosxe() {
        let dev = record(serde_json::json!({"id": "1", "softwareType": "IOS-XE"}));
        assert_eq!(dev.network_os(), "iosxe");

        let dev = record(serde_json::json!({"id": "1", "softwareType": "NX-OS"}));
        assert_eq!(dev.network_os(), "nxos");

        let dev = record(serde_json::json!({"id": "1"}));
        assert_eq!(dev.network_os(), "iosxe");
    }

    #[test]
    fn family_match_is_case_insensitive_exact() {
        let dev = record(serde_json::json!({"id": "1", "family": "Routers"}));
        assert!(dev.family_matches("routers"));
        assert!(dev.family_matches("ROUTERS"));
        assert!(!dev.family_matches("Router"));
        assert!(!dev.family_matches("outers"));
    }

    #[test]
    fn unknown_fields_land_in_extra() {
        let dev = record(serde_json::json!({
            "id": "1",
            "hostname": "R1",
            "upTime": "36 days, 12:40:31.00"
        }));
        assert!(dev.extra.contains_key("upTime"));
    }
}
