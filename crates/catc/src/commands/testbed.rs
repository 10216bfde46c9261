//! Test-bed YAML generation.

use std::fs;

use catc_core::{DeviceLogin, DirectoryService, to_testbed};

use crate::cli::{GlobalOpts, TestbedArgs};
use crate::error::CliError;

pub async fn handle(
    service: &DirectoryService,
    login: &DeviceLogin,
    args: TestbedArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let directory = service.fetch(None).await?;
    let testbed = to_testbed(&directory, login, args.name);

    let yaml = serde_yaml::to_string(&testbed)?;
    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(&args.output, yaml)?;

    if !global.quiet {
        eprintln!(
            "test-bed with {} devices written to {}",
            testbed.devices.len(),
            args.output.display()
        );
    }
    Ok(())
}
