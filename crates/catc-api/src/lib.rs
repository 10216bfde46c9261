// catc-api: Async Rust client for the Cisco Catalyst Center REST API

pub mod auth;
pub mod client;
pub mod devices;
pub mod error;
pub mod models;
pub mod transport;

pub use client::CatalystClient;
pub use error::Error;
pub use models::{DeviceListEnvelope, DeviceRecord};
pub use transport::{TlsMode, TransportConfig};
