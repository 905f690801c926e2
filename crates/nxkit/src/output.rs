//! Terminal output helpers: tables, status lines, quiet handling.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

/// Color only when stderr is a terminal and `NO_COLOR` is unset.
fn should_color() -> bool {
    io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

pub fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Status lines (stderr) ────────────────────────────────────────────

pub fn success(message: &str, quiet: bool) {
    if quiet {
        return;
    }
    if should_color() {
        eprintln!("{} {message}", "✓".green());
    } else {
        eprintln!("{message}");
    }
}

/// Per-device problems are always shown, even with `--quiet`.
pub fn warning(message: &str) {
    if should_color() {
        eprintln!("{} {}", "!".yellow().bold(), message.yellow());
    } else {
        eprintln!("warning: {message}");
    }
}
