//! CSV export of device rows.

use std::io;

use catc_core::{DeviceLogin, DirectoryService, export_rows};

use crate::cli::{ExportArgs, GlobalOpts};
use crate::error::CliError;

pub async fn handle(
    service: &DirectoryService,
    login: &DeviceLogin,
    args: ExportArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let directory = service.fetch(args.family.as_deref()).await?;
    let rows = export_rows(&directory, login);

    match args.output {
        Some(path) => {
            let mut writer = csv::Writer::from_path(&path)?;
            for row in &rows {
                writer.serialize(row)?;
            }
            writer.flush()?;
            if !global.quiet {
                eprintln!("{} rows written to {}", rows.len(), path.display());
            }
        }
        None => {
            let mut writer = csv::Writer::from_writer(io::stdout().lock());
            for row in &rows {
                writer.serialize(row)?;
            }
            writer.flush()?;
        }
    }
    Ok(())
}
