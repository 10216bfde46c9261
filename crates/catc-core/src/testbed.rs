// pyATS test-bed transformer
//
// Reshapes a device directory into the test-bed structure consumed by
// external test automation: a flat device map with SSH connection
// parameters and login credentials. No grouping concept. Pure.

use indexmap::IndexMap;
use secrecy::ExposeSecret;
use serde::Serialize;

use crate::directory::DeviceDirectory;
use crate::DeviceLogin;

/// Fixed SSH port for generated connection blocks.
const SSH_PORT: u16 = 22;

/// Top-level test-bed document, ready for YAML serialization.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TestbedDocument {
    pub testbed: TestbedMeta,
    pub devices: IndexMap<String, TestbedDevice>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TestbedMeta {
    pub name: String,
}

/// One device entry: OS, type, connection parameters, credentials.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TestbedDevice {
    pub os: String,
    #[serde(rename = "type")]
    pub device_type: String,
    pub connections: Connections,
    pub credentials: CredentialsBlock,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Connections {
    pub defaults: ConnectionDefaults,
    pub ssh: SshConnection,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ConnectionDefaults {
    pub class: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SshConnection {
    pub protocol: String,
    pub ip: Option<String>,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CredentialsBlock {
    pub default: DefaultCredentials,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DefaultCredentials {
    pub username: String,
    pub password: String,
}

/// Build a test-bed document from a directory.
///
/// One entry per device, keyed like the inventory (hostname, falling
/// back to id). Output is deterministic: the same directory and login
/// always yield byte-identical serialization.
pub fn to_testbed(
    directory: &DeviceDirectory,
    login: &DeviceLogin,
    name: impl Into<String>,
) -> TestbedDocument {
    let mut devices: IndexMap<String, TestbedDevice> = IndexMap::new();

    for dev in directory.iter() {
        devices.insert(
            dev.key().to_owned(),
            TestbedDevice {
                os: dev.network_os(),
                device_type: dev.device_type(),
                connections: Connections {
                    defaults: ConnectionDefaults {
                        class: "unicon.Unicon".into(),
                    },
                    ssh: SshConnection {
                        protocol: "ssh".into(),
                        ip: dev.management_ip_address.clone(),
                        port: SSH_PORT,
                    },
                },
                credentials: CredentialsBlock {
                    default: DefaultCredentials {
                        username: login.username.clone(),
                        password: login.password.expose_secret().to_owned(),
                    },
                },
            },
        );
    }

    TestbedDocument {
        testbed: TestbedMeta { name: name.into() },
        devices,
    }
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

    fn sample() -> crate::DeviceDirectory {
        directory(serde_json::json!([
            {
                "hostname": "R1",
                "family": "Routers",
                "managementIpAddress": "10.0.0.1",
                "softwareType": "IOS-XE"
            },
            {
                "id": "uuid-2",
                "managementIpAddress": "10.0.0.2"
            }
        ]))
    }

    #[test]
    fn one_flat_entry_per_device() {
        let tb = to_testbed(&sample(), &login(), "lab");

        assert_eq!(tb.testbed.name, "lab");
        assert_eq!(tb.devices.len(), 2);

        let r1 = tb.devices.get("R1").expect("R1 entry");
        assert_eq!(r1.os, "iosxe");
        assert_eq!(r1.device_type, "routers");
        assert_eq!(r1.connections.ssh.ip.as_deref(), Some("10.0.0.1"));
        assert_eq!(r1.connections.ssh.port, 22);
        assert_eq!(r1.connections.ssh.protocol, "ssh");
        assert_eq!(r1.connections.defaults.class, "unicon.Unicon");
        assert_eq!(r1.credentials.default.username, "netops");
        assert_eq!(r1.credentials.default.password, "hunter2");
    }

    #[test]
    fn sparse_record_gets_defaults() {
        let tb = to_testbed(&sample(), &login(), "lab");

        let dev = tb.devices.get("uuid-2").expect("keyed by id");
        assert_eq!(dev.os, "iosxe");
        assert_eq!(dev.device_type, "router");
    }

    #[test]
    fn yaml_output_is_byte_identical_across_runs() {
        let dir = sample();
        let a = serde_yaml::to_string(&to_testbed(&dir, &login(), "lab")).expect("yaml");
        let b = serde_yaml::to_string(&to_testbed(&dir, &login(), "lab")).expect("yaml");
        assert_eq!(a, b);
    }

    #[test]
    fn serialized_type_field_is_renamed() {
        let tb = to_testbed(&sample(), &login(), "lab");
        let value = serde_json::to_value(&tb).expect("serializable");
        assert_eq!(value["devices"]["R1"]["type"], serde_json::json!("routers"));
    }
}
