mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use catc_core::{DeviceLogin, DirectoryService};

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Completions need no controller connection
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "catc", &mut std::io::stdout());
            Ok(())
        }

        // All other commands talk to the controller
        cmd => {
            let creds = config::resolve_credentials(&cli.global)?;
            let login = DeviceLogin::new(
                creds.device_username.clone(),
                creds.device_password.clone(),
            );
            let service = DirectoryService::new(config::controller_config(&cli.global, &creds))?;

            tracing::debug!(command = ?cmd, "dispatching command");
            match cmd {
                Command::Devices(args) => {
                    commands::devices::handle(&service, args, &cli.global).await
                }
                Command::Inventory(args) => {
                    commands::inventory::handle(&service, &login, args).await
                }
                Command::Testbed(args) => {
                    commands::testbed::handle(&service, &login, args, &cli.global).await
                }
                Command::Export(args) => {
                    commands::export::handle(&service, &login, args, &cli.global).await
                }
                Command::Completions(_) => unreachable!("handled above"),
            }
        }
    }
}
