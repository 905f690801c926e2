// nxkit-core: Turns raw NX-API responses into interface health metrics
// and fixed-width text reports.

pub mod convert;
pub mod error;
pub mod metrics;
pub mod model;
pub mod render;
pub mod report;
pub mod session;
pub mod transport;

// ── Primary re-exports ──────────────────────────────────────────────
pub use error::CoreError;
pub use metrics::{
    classify_status, derive_health_row, error_rate, filter_physical_interfaces, normalize_load,
};
pub use model::{
    DeviceCredential, DeviceIdentity, InterfaceFilter, InterfaceHealthRow, InterfaceRawSample,
    InterfaceStatus, NamedInterface, NeighborRecord, Percent,
};
pub use render::{
    render_generation_banner, render_identity_block, render_interface_table,
    render_neighbor_table,
};
pub use report::{ConsoleSink, OutputMode, ReportBuffer, ReportKind, ReportSink, report_file_name};
pub use session::{DeviceFailure, DeviceOutcome, Session, SessionReport, SessionSummary};
pub use transport::{HttpTransport, Transport};

// Transport settings live in the API crate; re-exported for config consumers.
pub use nxkit_api::{Scheme, TlsMode, TransportConfig};
