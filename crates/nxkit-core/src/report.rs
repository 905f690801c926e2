// ── Report sinks ──
//
// Rendered text goes either straight to a writer (print mode) or into an
// append-only buffer that is written to a timestamped file once the
// session completes (save mode).

use std::fmt;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::info;

use crate::error::CoreError;

/// Where a session's text goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Emit each device's text as soon as it is rendered.
    #[default]
    Immediate,
    /// Collect all text and write it to one report file at the end.
    Accumulate,
}

/// Which report a session produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    InterfaceAlert,
    CdpNeighbors,
}

impl ReportKind {
    /// File name prefix for saved reports.
    pub fn file_prefix(self) -> &'static str {
        match self {
            Self::InterfaceAlert => "interface_alert",
            Self::CdpNeighbors => "cdp_neighbor",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::InterfaceAlert => "summary of interface alert",
            Self::CdpNeighbors => "CDP neighbors detail",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// `interface_alert_20240307-090503.txt` style file name.
pub fn report_file_name(kind: ReportKind, completed_at: &NaiveDateTime) -> String {
    format!(
        "{}_{}.txt",
        kind.file_prefix(),
        completed_at.format("%Y%m%d-%H%M%S")
    )
}

// ── Sink trait ───────────────────────────────────────────────────────

/// Receives one rendered block per successful device.
pub trait ReportSink {
    fn emit(&mut self, block: &str) -> io::Result<()>;
}

/// Writes each block followed by a newline, like a terminal print.
#[derive(Debug)]
pub struct ConsoleSink<W: Write> {
    out: W,
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl ConsoleSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ReportSink for ConsoleSink<W> {
    fn emit(&mut self, block: &str) -> io::Result<()> {
        writeln!(self.out, "{block}")?;
        self.out.flush()
    }
}

// ── Accumulating buffer ──────────────────────────────────────────────

/// Append-only report body, flushed to disk exactly once.
#[derive(Debug, Default)]
pub struct ReportBuffer {
    segments: Vec<String>,
}

impl ReportBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of blocks appended so far.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// The report body as it would be written.
    pub fn contents(&self) -> String {
        self.segments.concat()
    }

    /// Write the buffer to `dir/<kind>_<timestamp>.txt`, consuming it.
    pub fn flush_to(
        self,
        dir: &Path,
        kind: ReportKind,
        completed_at: &NaiveDateTime,
    ) -> Result<PathBuf, CoreError> {
        let path = dir.join(report_file_name(kind, completed_at));
        let write_err = |source| CoreError::ReportWrite {
            path: path.display().to_string(),
            source,
        };

        let mut file = File::create(&path).map_err(write_err)?;
        for segment in &self.segments {
            file.write_all(segment.as_bytes()).map_err(write_err)?;
        }
        file.flush().map_err(write_err)?;

        info!(path = %path.display(), blocks = self.segments.len(), "report written");
        Ok(path)
    }
}

impl ReportSink for ReportBuffer {
    fn emit(&mut self, block: &str) -> io::Result<()> {
        self.segments.push(block.to_owned());
        Ok(())
    }
}
