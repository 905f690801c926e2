// ── Session orchestration ──
//
// One pass over the device inventory for one report kind. Devices are
// handled strictly in order; each device's blocks are staged in full before
// any reaches the sink, so a failed query never leaves a partial report
// behind and never disturbs text already emitted for other devices.

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use nxkit_api::{CliCommand, ShowCdpNeighborsDetail, ShowInterface, ShowVersion, decode_body};
use serde::de::DeserializeOwned;
use tracing::{Instrument, debug, info_span, warn};

use crate::convert::{health_rows, identity_from_version, neighbor_records};
use crate::error::CoreError;
use crate::model::{DeviceCredential, InterfaceFilter};
use crate::render::{
    render_generation_banner, render_identity_block, render_interface_table,
    render_neighbor_table,
};
use crate::report::{ConsoleSink, OutputMode, ReportBuffer, ReportKind, ReportSink};
use crate::transport::Transport;

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

// ── Outcomes ─────────────────────────────────────────────────────────

/// Passed to the per-device callback once a device is finished.
#[derive(Debug, Clone, Copy)]
pub enum DeviceOutcome<'a> {
    Rendered,
    Failed(&'a CoreError),
}

/// A device whose report could not be produced.
#[derive(Debug)]
pub struct DeviceFailure {
    pub device: String,
    pub address: String,
    pub error: CoreError,
}

/// What happened across one session.
#[derive(Debug)]
pub struct SessionSummary {
    pub kind: ReportKind,
    pub succeeded: usize,
    pub failures: Vec<DeviceFailure>,
}

impl SessionSummary {
    fn new(kind: ReportKind) -> Self {
        Self {
            kind,
            succeeded: 0,
            failures: Vec::new(),
        }
    }

    pub fn attempted(&self) -> usize {
        self.succeeded + self.failures.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Summary plus the report file, when the session saved one.
#[derive(Debug)]
pub struct SessionReport {
    pub summary: SessionSummary,
    pub saved_to: Option<PathBuf>,
}

// ── Session ──────────────────────────────────────────────────────────

/// Queries devices and turns their responses into report text.
pub struct Session<T: Transport> {
    transport: T,
    filter: InterfaceFilter,
    clock: fn() -> NaiveDateTime,
}

impl<T: Transport> Session<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            filter: InterfaceFilter::default(),
            clock: local_now,
        }
    }

    #[must_use]
    pub fn with_filter(mut self, filter: InterfaceFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Replace the wall clock used for banners and report file names.
    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn query<R: DeserializeOwned>(
        &self,
        device: &DeviceCredential,
        command: CliCommand,
    ) -> Result<R, CoreError> {
        let body = self.transport.query(device, command).await?;
        Ok(decode_body(command, body)?)
    }

    /// Banner, identity block and table for one device, as three blocks
    /// for the sink.
    ///
    /// The banner is stamped when the identity query returns.
    pub async fn render_device(
        &self,
        kind: ReportKind,
        device: &DeviceCredential,
    ) -> Result<Vec<String>, CoreError> {
        let version: ShowVersion = self.query(device, CliCommand::ShowVersion).await?;
        let identity = identity_from_version(version, &device.address);

        let banner = render_generation_banner(&(self.clock)());
        let table = match kind {
            ReportKind::InterfaceAlert => {
                let response: ShowInterface =
                    self.query(device, CliCommand::ShowInterface).await?;
                let rows = health_rows(response, &self.filter)?;
                let down = rows.iter().filter(|r| r.status.is_alert()).count();
                debug!(rows = rows.len(), down, "interfaces derived");
                render_interface_table(&rows)
            }
            ReportKind::CdpNeighbors => {
                let response: ShowCdpNeighborsDetail =
                    self.query(device, CliCommand::ShowCdpNeighborsDetail).await?;
                let rows = neighbor_records(response, &self.filter)?;
                debug!(rows = rows.len(), "neighbors mapped");
                render_neighbor_table(&rows)
            }
        };

        Ok(vec![banner, render_identity_block(&identity), table])
    }

    /// Render every device in order into `sink`.
    ///
    /// A device failure is logged, recorded and skipped. Only a sink
    /// write error aborts the session.
    pub async fn run<S, F>(
        &self,
        kind: ReportKind,
        devices: &[DeviceCredential],
        sink: &mut S,
        mut after_device: F,
    ) -> Result<SessionSummary, CoreError>
    where
        S: ReportSink + ?Sized,
        F: FnMut(&DeviceCredential, DeviceOutcome<'_>),
    {
        let mut summary = SessionSummary::new(kind);

        for device in devices {
            let span = info_span!("device", name = %device.name, address = %device.address);
            match self.render_device(kind, device).instrument(span.clone()).await {
                Ok(blocks) => {
                    for block in &blocks {
                        sink.emit(block)?;
                    }
                    summary.succeeded += 1;
                    after_device(device, DeviceOutcome::Rendered);
                }
                Err(error) => {
                    span.in_scope(|| warn!(%error, "skipping device"));
                    after_device(device, DeviceOutcome::Failed(&error));
                    summary.failures.push(DeviceFailure {
                        device: device.name.clone(),
                        address: device.address.clone(),
                        error,
                    });
                }
            }
        }

        Ok(summary)
    }

    /// Run a session in the given output mode.
    ///
    /// `Immediate` prints to stdout. `Accumulate` writes one report file
    /// into `report_dir`, stamped with the completion time, even when no
    /// device succeeded.
    pub async fn execute<F>(
        &self,
        kind: ReportKind,
        devices: &[DeviceCredential],
        mode: OutputMode,
        report_dir: &Path,
        after_device: F,
    ) -> Result<SessionReport, CoreError>
    where
        F: FnMut(&DeviceCredential, DeviceOutcome<'_>),
    {
        match mode {
            OutputMode::Immediate => {
                let mut sink = ConsoleSink::stdout();
                let summary = self.run(kind, devices, &mut sink, after_device).await?;
                Ok(SessionReport {
                    summary,
                    saved_to: None,
                })
            }
            OutputMode::Accumulate => {
                let mut buffer = ReportBuffer::new();
                let summary = self.run(kind, devices, &mut buffer, after_device).await?;
                let path = buffer.flush_to(report_dir, kind, &(self.clock)())?;
                Ok(SessionReport {
                    summary,
                    saved_to: Some(path),
                })
            }
        }
    }
}
