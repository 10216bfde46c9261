//! Business logic for the Catalyst Center tools.
//!
//! Wraps the raw API client in a directory service with user-facing
//! errors, and provides the pure transformers that reshape a device
//! directory into downstream schemas (Ansible dynamic inventory, pyATS
//! test-bed, tabular export). The transformers do no I/O -- given the
//! same directory and login they always produce the same document.

pub mod directory;
pub mod error;
pub mod export;
pub mod inventory;
pub mod testbed;

pub use catc_api::{DeviceRecord, TlsMode, TransportConfig};
pub use directory::{ControllerConfig, DeviceDirectory, DirectoryService};
pub use error::CoreError;
pub use export::{ExportRow, export_rows};
pub use inventory::{InventoryDocument, to_inventory};
pub use testbed::{TestbedDocument, to_testbed};

use secrecy::SecretString;

/// Login credentials propagated into generated documents.
///
/// Deliberately separate from the controller credentials: the default
/// wiring copies the controller login into these slots, but consumers
/// can supply different ones when device SSH access diverges.
#[derive(Debug, Clone)]
pub struct DeviceLogin {
    pub username: String,
    pub password: SecretString,
}

impl DeviceLogin {
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }
}
