//! Command handlers, one module per top-level subcommand.

pub mod devices;
pub mod export;
pub mod inventory;
pub mod testbed;
