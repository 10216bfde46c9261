// Tabular export rows
//
// Flattens the directory into per-device rows for spreadsheet-style
// consumers. Only the Routers and Switches-and-Hubs families are
// included; other families (APs, sensors, wireless controllers) are not
// useful to the downstream SSH tooling this feeds.

use secrecy::ExposeSecret;
use serde::Serialize;

use crate::directory::DeviceDirectory;
use crate::DeviceLogin;

/// Families included in the export.
const EXPORT_FAMILIES: [&str; 2] = ["Routers", "Switches and Hubs"];

/// One export row, serializable as a CSV record.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ExportRow {
    pub hostname: String,
    pub ip: String,
    pub username: String,
    pub password: String,
    pub protocol: String,
    pub os: String,
}

/// Build export rows from a directory.
///
/// Hostnames are truncated at the first dot (domain suffixes vary across
/// sites); the `ip` column carries the SSH port inline as `addr:22`.
/// Missing values degrade to `N/A` rather than dropping the row.
pub fn export_rows(directory: &DeviceDirectory, login: &DeviceLogin) -> Vec<ExportRow> {
    directory
        .iter()
        .filter(|dev| {
            EXPORT_FAMILIES
                .iter()
                .any(|family| dev.family_matches(family))
        })
        .map(|dev| {
            let hostname = dev
                .hostname
                .as_deref()
                .filter(|h| !h.is_empty())
                .unwrap_or("N/A")
                .split('.')
                .next()
                .unwrap_or("N/A")
                .to_owned();
            let ip = format!(
                "{}:22",
                dev.management_ip_address.as_deref().unwrap_or("N/A")
            );
            ExportRow {
                hostname,
                ip,
                username: login.username.clone(),
                password: login.password.expose_secret().to_owned(),
                protocol: "ssh".into(),
                os: dev.network_os(),
            }
        })
        .collect()
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use secrecy::SecretString;

    use super::*;
    use crate::directory::tests::directory;

    fn login() -> DeviceLogin {
        DeviceLogin::new("netops", SecretString::from("hunter2".to_owned()))
    }

    #[test]
    fn excludes_non_router_switch_families() {
        let dir = directory(serde_json::json!([
            {"hostname": "R1", "family": "Routers", "managementIpAddress": "10.0.0.1"},
            {"hostname": "AP1", "family": "Unified AP", "managementIpAddress": "10.0.0.2"},
            {"hostname": "SW1", "family": "Switches and Hubs", "managementIpAddress": "10.0.0.3"},
            {"hostname": "X1"}
        ]));

        let rows = export_rows(&dir, &login());
        let hostnames: Vec<_> = rows.iter().map(|r| r.hostname.as_str()).collect();
        assert_eq!(hostnames, ["R1", "SW1"]);
    }

    #[test]
    fn hostname_truncated_at_first_dot() {
        let dir = directory(serde_json::json!([
            {"hostname": "edge-rtr-01.site.example.com", "family": "Routers",
             "managementIpAddress": "10.1.1.1", "softwareType": "IOS-XE"}
        ]));

        let rows = export_rows(&dir, &login());
        assert_eq!(rows[0].hostname, "edge-rtr-01");
        assert_eq!(rows[0].ip, "10.1.1.1:22");
        assert_eq!(rows[0].protocol, "ssh");
        assert_eq!(rows[0].os, "iosxe");
    }

    #[test]
    fn missing_fields_degrade_to_placeholders() {
        let dir = directory(serde_json::json!([
            {"id": "u1", "family": "Routers"}
        ]));

        let rows = export_rows(&dir, &login());
        assert_eq!(rows[0].hostname, "N/A");
        assert_eq!(rows[0].ip, "N/A:22");
        assert_eq!(rows[0].os, "iosxe");
    }
}
