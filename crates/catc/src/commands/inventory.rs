//! Ansible dynamic-inventory verbs.
//!
//! The dynamic-inventory protocol fixes the output: JSON on stdout,
//! `--list` for the whole inventory, `--host <name>` for one host's
//! variables (an empty object when the host is unknown). `--output` is
//! deliberately ignored here.

use catc_core::{DeviceLogin, DirectoryService, to_inventory};

use crate::cli::InventoryArgs;
use crate::error::CliError;
use crate::output;

pub async fn handle(
    service: &DirectoryService,
    login: &DeviceLogin,
    args: InventoryArgs,
) -> Result<(), CliError> {
    let directory = service.fetch(None).await?;
    let inventory = to_inventory(&directory, login, !args.flat);

    // No verb behaves like --list, per the inventory protocol; clap
    // rejects --list together with --host.
    let rendered = if args.list || args.host.is_none() {
        output::render_json_pretty(&inventory)
    } else {
        match args.host.as_deref().and_then(|host| inventory.host_vars(host)) {
            Some(vars) => output::render_json_pretty(vars),
            None => "{}".to_owned(),
        }
    };

    println!("{rendered}");
    Ok(())
}
