//! Device listing.

use owo_colors::OwoColorize;
use tabled::Tabled;

use catc_core::{DeviceRecord, DirectoryService};

use crate::cli::{DevicesArgs, DevicesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "Hostname")]
    hostname: String,
    #[tabled(rename = "Family")]
    family: String,
    #[tabled(rename = "Platform")]
    platform: String,
    #[tabled(rename = "Version")]
    version: String,
    #[tabled(rename = "Reachability")]
    reachability: String,
    #[tabled(rename = "Mgmt IP")]
    mgmt_ip: String,
    #[tabled(rename = "ID")]
    id: String,
}

fn device_row(d: &DeviceRecord, color: bool) -> DeviceRow {
    let reachability = d.reachability_status.clone().unwrap_or_default();
    let reachability = if color {
        match reachability.to_lowercase().as_str() {
            "reachable" => reachability.green().to_string(),
            "unreachable" => reachability.red().to_string(),
            _ => reachability.yellow().to_string(),
        }
    } else {
        reachability
    };
    DeviceRow {
        hostname: d.key().to_owned(),
        family: d.family.clone().unwrap_or_default(),
        platform: d.platform_id.clone().unwrap_or_default(),
        version: d.software_version.clone().unwrap_or_default(),
        reachability,
        mgmt_ip: d.management_ip_address.clone().unwrap_or_default(),
        id: d.id.clone(),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    service: &DirectoryService,
    args: DevicesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        DevicesCommand::List { family } => {
            let directory = service.fetch(family.as_deref()).await?;
            let color = output::should_color(&global.color);
            let out = output::render_list(
                &global.output,
                &directory.devices,
                |d| device_row(d, color),
                |d| d.key().to_owned(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
