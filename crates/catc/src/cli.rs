//! Clap derive structures for the `catc` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// catc -- Catalyst Center device-directory toolkit
#[derive(Debug, Parser)]
#[command(
    name = "catc",
    version,
    about = "Query the Catalyst Center device directory and generate downstream files",
    long_about = "Queries Cisco Catalyst Center for the managed-device list and\n\
        reshapes it for downstream tools: Ansible dynamic inventory, pyATS\n\
        test-bed YAML, and tabular CSV export.\n\n\
        Credentials come from the environment: DNAC_BURL, DNAC_USER, DNAC_PASS.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Controller base URL (overrides DNAC_BURL)
    #[arg(long, short = 'c', env = "DNAC_BURL", global = true)]
    pub controller: Option<String>,

    /// Controller username (overrides DNAC_USER)
    #[arg(long, short = 'u', env = "DNAC_USER", global = true)]
    pub username: Option<String>,

    /// Output format
    #[arg(long, short = 'o', default_value = "table", global = true)]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "DNAC_INSECURE", global = true)]
    pub insecure: bool,

    /// Verify TLS against a custom CA certificate (PEM)
    #[arg(long, env = "DNAC_CA_CERT", global = true)]
    pub ca_cert: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, env = "DNAC_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List managed devices
    #[command(alias = "dev", alias = "d")]
    Devices(DevicesArgs),

    /// Emit an Ansible dynamic inventory (JSON on stdout)
    #[command(alias = "inv")]
    Inventory(InventoryArgs),

    /// Generate a pyATS test-bed YAML file
    #[command(alias = "tb")]
    Testbed(TestbedArgs),

    /// Export device rows as CSV
    Export(ExportArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Devices ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    pub command: DevicesCommand,
}

#[derive(Debug, Subcommand)]
pub enum DevicesCommand {
    /// List devices from the controller
    #[command(alias = "ls")]
    List {
        /// Only devices of this family (case-insensitive exact match,
        /// e.g. "Routers" or "Switches and Hubs")
        #[arg(long, short = 'f')]
        family: Option<String>,
    },
}

// ── Inventory ────────────────────────────────────────────────────────

/// Ansible dynamic-inventory verbs. Output is always JSON on stdout,
/// per the dynamic-inventory protocol.
#[derive(Debug, Args)]
pub struct InventoryArgs {
    /// Print the full inventory (default when no verb is given)
    #[arg(long, conflicts_with = "host")]
    pub list: bool,

    /// Print one host's variables
    #[arg(long)]
    pub host: Option<String>,

    /// Place every host under "ungrouped" instead of grouping by family
    #[arg(long)]
    pub flat: bool,
}

// ── Testbed ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct TestbedArgs {
    /// Output YAML file
    #[arg(long, short = 'O', default_value = "generated_testbed.yaml")]
    pub output: PathBuf,

    /// Name recorded in the test-bed document
    #[arg(long, default_value = "generated_testbed")]
    pub name: String,
}

// ── Export ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Output CSV file (stdout when omitted)
    #[arg(long, short = 'O')]
    pub output: Option<PathBuf>,

    /// Only devices of this family before the built-in Router/Switch cut
    #[arg(long, short = 'f')]
    pub family: Option<String>,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inventory_list_flag_parses() {
        let cli =
            Cli::try_parse_from(["catc", "inventory", "--list"]).expect("valid invocation");
        match cli.command {
            Command::Inventory(args) => {
                assert!(args.list);
                assert!(args.host.is_none());
            }
            other => panic!("expected inventory, got: {other:?}"),
        }
    }

    #[test]
    fn inventory_host_verb_parses() {
        let cli =
            Cli::try_parse_from(["catc", "inventory", "--host", "R1"]).expect("valid invocation");
        match cli.command {
            Command::Inventory(args) => {
                assert!(!args.list);
                assert_eq!(args.host.as_deref(), Some("R1"));
            }
            other => panic!("expected inventory, got: {other:?}"),
        }
    }
}
