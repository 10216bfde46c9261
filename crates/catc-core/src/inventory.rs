// Ansible dynamic-inventory transformer
//
// Reshapes a device directory into the JSON structure Ansible expects
// from a dynamic-inventory script: group names at the top level, an
// `all` group listing the children, and a `_meta` section with per-host
// variables. Pure -- no network or file I/O.

use indexmap::IndexMap;
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::ser::SerializeMap;

use crate::directory::DeviceDirectory;
use crate::DeviceLogin;

/// Group name used when family grouping is off or a device has no family.
pub const UNGROUPED: &str = "ungrouped";

/// A single inventory group.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct InventoryGroup {
    pub hosts: Vec<String>,
}

/// Per-host connection variables.
///
/// The login propagated here is the device-login slot -- by default the
/// same account used against the controller.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct HostVars {
    pub ansible_host: Option<String>,
    pub ansible_user: String,
    pub ansible_password: String,
    pub ansible_network_os: String,
}

/// The complete dynamic-inventory document.
///
/// Serializes to the Ansible wire shape:
///
/// ```json
/// {
///   "routers": { "hosts": ["R1"] },
///   "all": { "children": ["routers"] },
///   "_meta": { "hostvars": { "R1": { ... } } }
/// }
/// ```
///
/// Group order and `all.children` order are first-seen order; maps are
/// index maps so repeated runs serialize identically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryDocument {
    pub groups: IndexMap<String, InventoryGroup>,
    pub children: Vec<String>,
    pub hostvars: IndexMap<String, HostVars>,
}

impl InventoryDocument {
    /// Look up one host's variables (the `--host` verb).
    pub fn host_vars(&self, host: &str) -> Option<&HostVars> {
        self.hostvars.get(host)
    }
}

impl Serialize for InventoryDocument {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct All<'a> {
            children: &'a [String],
        }
        #[derive(Serialize)]
        struct Meta<'a> {
            hostvars: &'a IndexMap<String, HostVars>,
        }

        let mut map = serializer.serialize_map(Some(self.groups.len() + 2))?;
        for (name, group) in &self.groups {
            map.serialize_entry(name, group)?;
        }
        map.serialize_entry(
            "all",
            &All {
                children: &self.children,
            },
        )?;
        map.serialize_entry(
            "_meta",
            &Meta {
                hostvars: &self.hostvars,
            },
        )?;
        map.end()
    }
}

/// Build an inventory document from a directory.
///
/// Hosts are keyed by hostname (falling back to the controller id) and
/// grouped by normalized family; with `group_by_family` off every host
/// lands under `ungrouped` regardless of family. Every host that appears
/// in a group gets exactly one `hostvars` entry.
pub fn to_inventory(
    directory: &DeviceDirectory,
    login: &DeviceLogin,
    group_by_family: bool,
) -> InventoryDocument {
    let mut groups: IndexMap<String, InventoryGroup> = IndexMap::new();
    let mut children: Vec<String> = Vec::new();
    let mut hostvars: IndexMap<String, HostVars> = IndexMap::new();

    for dev in directory.iter() {
        let host = dev.key().to_owned();
        let group = if group_by_family {
            dev.group_name()
        } else {
            UNGROUPED.to_owned()
        };

        let entry = groups.entry(group.clone()).or_insert_with(|| {
            children.push(group);
            InventoryGroup { hosts: Vec::new() }
        });
        entry.hosts.push(host.clone());

        hostvars.insert(
            host,
            HostVars {
                ansible_host: dev.management_ip_address.clone(),
                ansible_user: login.username.clone(),
                ansible_password: login.password.expose_secret().to_owned(),
                ansible_network_os: dev.network_os(),
            },
        );
    }

    InventoryDocument {
        groups,
        children,
        hostvars,
    }
}

// ── Tests ────────────────────────────────────────────────────────────
