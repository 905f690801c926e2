//! `alerts` and `neighbors`: one report session over the inventory.

use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use nxkit_core::{
    DeviceOutcome, HttpTransport, OutputMode, ReportKind, Session, SessionReport, SessionSummary,
};

use crate::cli::{GlobalOpts, ReportArgs};
use crate::config;
use crate::error::CliError;
use crate::output;

pub const NEXT_DEVICE_PROMPT: &str = "Hit return to go to the next device or back to the menu.";
pub const BACK_TO_MENU_PROMPT: &str = "Hit return to go back to the menu.";

/// Whether to wait for the operator between devices in print mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pace {
    Continuous,
    Interactive,
}

pub async fn handle(
    kind: ReportKind,
    args: &ReportArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let mode = if args.save {
        OutputMode::Accumulate
    } else {
        OutputMode::Immediate
    };
    let report = run(kind, mode, global, Pace::Continuous).await?;
    into_result(report.summary)
}

/// Block until the operator hits return. Prompt failures only end the wait.
pub fn pause(prompt: &str) {
    let answer = Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .report(false)
        .interact_text();
    if let Err(e) = answer {
        tracing::debug!(error = %e, "pause prompt unavailable");
    }
}

fn progress_bar(len: usize, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(u64::try_from(len).unwrap_or(u64::MAX));
    if let Ok(style) = ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}") {
        bar.set_style(style.progress_chars("=> "));
    }
    bar
}

/// Run one session. Device failures are reported as they happen and
/// recorded in the summary; only setup and output errors return `Err`.
pub async fn run(
    kind: ReportKind,
    mode: OutputMode,
    global: &GlobalOpts,
    pace: Pace,
) -> Result<SessionReport, CliError> {
    let settings = config::resolve_run_settings(global)?;
    let session =
        Session::new(HttpTransport::new(settings.transport)).with_filter(settings.filter);

    let progress = match mode {
        OutputMode::Accumulate => progress_bar(settings.devices.len(), global.quiet),
        OutputMode::Immediate => ProgressBar::hidden(),
    };

    tracing::debug!(%kind, ?mode, devices = settings.devices.len(), "starting session");

    let report = session
        .execute(
            kind,
            &settings.devices,
            mode,
            &settings.report_dir,
            |device, outcome| {
                if let DeviceOutcome::Failed(err) = outcome {
                    progress.suspend(|| {
                        output::warning(&format!("{} ({}): {err}", device.name, device.address));
                    });
                }
                match mode {
                    OutputMode::Immediate if pace == Pace::Interactive => {
                        pause(NEXT_DEVICE_PROMPT);
                        println!("\n");
                    }
                    OutputMode::Immediate => {}
                    OutputMode::Accumulate => {
                        progress.set_message(device.name.clone());
                        progress.inc(1);
                    }
                }
            },
        )
        .await;
    progress.finish_and_clear();
    let report = report?;

    if let Some(ref path) = report.saved_to {
        output::success(
            &format!(
                "The {kind} has been saved to the file name \"{}\".",
                path.display()
            ),
            global.quiet,
        );
    }

    Ok(report)
}

/// Exit status for a finished session.
///
/// A session where every device failed reports the first failure, so a
/// single unreachable switch exits with the connection code.
pub fn into_result(summary: SessionSummary) -> Result<(), CliError> {
    let attempted = summary.attempted();
    let failed = summary.failures.len();
    match summary.failures.into_iter().next() {
        None => Ok(()),
        Some(first) if summary.succeeded == 0 => Err(first.error.into()),
        Some(_) => Err(CliError::DevicesFailed { failed, attempted }),
    }
}
