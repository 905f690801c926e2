//! Interactive main menu.

use std::io::{self, IsTerminal};

use dialoguer::Select;
use dialoguer::console::Term;
use nxkit_core::{OutputMode, ReportKind};

use super::prompt_err;
use super::report::{self, BACK_TO_MENU_PROMPT, Pace};
use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

const OPTIONS: [&str; 5] = [
    "1. Print summary of interface alert on screen.",
    "2. Save summary of interface alert to file.",
    "3. Print CDP neighbors in detail.",
    "4. Save CDP neighbors detail to file.",
    "5. Exit.",
];

const TITLE: [&str; 5] = [
    r"              _     _  _",
    r" _ __  __  __| | __(_)| |_",
    r"| '_ \ \ \/ /| |/ /| || __|",
    r"| | | | >  < |   < | || |_",
    r"|_| |_|/_/\_\|_|\_\|_| \__|",
];

fn print_header() {
    if let Err(e) = Term::stdout().clear_screen() {
        tracing::debug!(error = %e, "could not clear screen");
    }
    for line in TITLE {
        println!("{line}");
    }
    println!("{:>27}", concat!("v", env!("CARGO_PKG_VERSION")));
    println!("\n{}", "=".repeat(12));
    println!(" Main Menu:");
    println!("{}\n", "=".repeat(12));
}

fn selection(index: usize) -> Option<(ReportKind, OutputMode)> {
    match index {
        0 => Some((ReportKind::InterfaceAlert, OutputMode::Immediate)),
        1 => Some((ReportKind::InterfaceAlert, OutputMode::Accumulate)),
        2 => Some((ReportKind::CdpNeighbors, OutputMode::Immediate)),
        3 => Some((ReportKind::CdpNeighbors, OutputMode::Accumulate)),
        _ => None,
    }
}

/// Loop until the operator picks Exit or presses Esc.
///
/// The config is re-read for every action, so inventory edits apply
/// without restarting. Errors are shown and the menu comes back.
pub async fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    if !io::stdin().is_terminal() || !io::stderr().is_terminal() {
        return Err(CliError::NotInteractive);
    }

    loop {
        print_header();
        let choice = Select::new()
            .with_prompt("Enter your option")
            .items(&OPTIONS)
            .default(0)
            .interact_opt()
            .map_err(prompt_err)?;

        let Some((kind, mode)) = choice.and_then(selection) else {
            return Ok(());
        };

        match report::run(kind, mode, global, Pace::Interactive).await {
            Ok(done) => {
                if !done.summary.is_clean() {
                    output::warning(&format!(
                        "{} of {} devices failed",
                        done.summary.failures.len(),
                        done.summary.attempted()
                    ));
                }
                if mode == OutputMode::Accumulate || !done.summary.is_clean() {
                    report::pause(BACK_TO_MENU_PROMPT);
                }
            }
            Err(err) => {
                eprintln!("{:?}", miette::Report::new(err));
                report::pause(BACK_TO_MENU_PROMPT);
            }
        }
    }
}
