//! Command dispatch: bridges CLI args to report sessions and config edits.

pub mod config_cmd;
pub mod devices;
pub mod menu;
pub mod report;

use clap::CommandFactory;
use nxkit_core::ReportKind;

use crate::cli::{Cli, Command, GlobalOpts};
use crate::error::CliError;

/// Map a dialoguer / interactive I/O failure into CliError.
pub(crate) fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Dispatch a subcommand; `None` opens the interactive menu.
pub async fn dispatch(cmd: Option<Command>, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        None | Some(Command::Menu) => menu::handle(global).await,
        Some(Command::Alerts(args)) => {
            report::handle(ReportKind::InterfaceAlert, &args, global).await
        }
        Some(Command::Neighbors(args)) => {
            report::handle(ReportKind::CdpNeighbors, &args, global).await
        }
        Some(Command::Devices) => devices::handle(global),
        Some(Command::Config(args)) => config_cmd::handle(args, global),
        Some(Command::Completions(args)) => {
            let mut cmd = Cli::command();
            clap_complete::generate(args.shell, &mut cmd, "nxkit", &mut std::io::stdout());
            Ok(())
        }
    }
}
