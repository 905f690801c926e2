//! Clap derive structures for the `nxkit` CLI.
//!
//! Defines the command tree and global flags. Kept free of crate imports
//! so `build.rs` can include it for man page generation.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// nxkit -- interface alert and CDP neighbor reports for Nexus switches
#[derive(Debug, Parser)]
#[command(
    name = "nxkit",
    version,
    about = "Interface alert and CDP neighbor reports for Nexus switches",
    long_about = "Queries every switch in the device inventory over NX-API and renders\n\
        interface health or CDP neighbor tables to the terminal or to a\n\
        timestamped report file.\n\n\
        Run without a subcommand for the interactive menu.",
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Option<Command>,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Path to the config file (defaults to the platform config dir)
    #[arg(long, env = "NXKIT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Directory saved reports are written to (overrides config)
    #[arg(long, global = true)]
    pub report_dir: Option<PathBuf>,

    /// Interface name prefix treated as physical (overrides config)
    #[arg(long, global = true)]
    pub interface_prefix: Option<String>,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides config)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive main menu (default when no subcommand is given)
    Menu,

    /// Interface alert summary for every device
    #[command(alias = "a")]
    Alerts(ReportArgs),

    /// CDP neighbors detail for every device
    #[command(alias = "cdp", alias = "n")]
    Neighbors(ReportArgs),

    /// List configured devices
    #[command(alias = "d")]
    Devices,

    /// Manage configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Save to a timestamped report file instead of printing
    #[arg(long, short = 's')]
    pub save: bool,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file path
    Path,

    /// Display the resolved configuration (passwords redacted)
    Show,

    /// Store a device password in the system keyring
    SetPassword {
        /// Device name as listed in the config
        device: String,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
