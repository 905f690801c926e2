//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use nxkit_config::ConfigError;
use nxkit_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to {address}")]
    #[diagnostic(
        code(nxkit::connection_failed),
        help(
            "Check that the switch is reachable and NX-API is enabled (`feature nxapi`).\n\
             Reason: {reason}"
        )
    )]
    ConnectionFailed { address: String, reason: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(nxkit::timeout),
        help("Increase the timeout with --timeout or `timeout` under [defaults].")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(nxkit::auth_failed),
        help(
            "Verify the device username and password.\n\
             Run: nxkit config set-password <device>"
        )
    )]
    AuthFailed { message: String },

    #[error("No password configured for device '{device}'")]
    #[diagnostic(
        code(nxkit::no_credentials),
        help(
            "Set `password`, `password_env`, or run: nxkit config set-password {device}"
        )
    )]
    NoCredentials { device: String },

    // ── Switch responses ─────────────────────────────────────────────
    #[error("Switch rejected the request: {message}")]
    #[diagnostic(code(nxkit::api_error))]
    Api { message: String },

    #[error("Unexpected `{command}` response: {message}")]
    #[diagnostic(
        code(nxkit::malformed_response),
        help("The switch answered with data nxkit cannot read. Run with -vv for details.")
    )]
    MalformedResponse { command: String, message: String },

    #[error("Switch reported `{field}` = {value}, above the maximum of {max}")]
    #[diagnostic(code(nxkit::protocol_violation))]
    ProtocolViolation { field: String, value: u64, max: u64 },

    #[error("{failed} of {attempted} devices failed")]
    #[diagnostic(
        code(nxkit::devices_failed),
        help("Reports for the remaining devices were produced. Run with -v for details.")
    )]
    DevicesFailed { failed: usize, attempted: usize },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(nxkit::validation))]
    Validation { field: String, reason: String },

    #[error("Interactive menu requires a terminal")]
    #[diagnostic(
        code(nxkit::not_interactive),
        help("Use `nxkit alerts` or `nxkit neighbors` in scripts.")
    )]
    NotInteractive,

    // ── Configuration ────────────────────────────────────────────────
    #[error("No devices configured")]
    #[diagnostic(
        code(nxkit::no_devices),
        help(
            "Add [[devices]] entries with name, address and username.\n\
             Expected at: {path}"
        )
    )]
    NoDevices { path: String },

    #[error("Device '{device}' not found in configuration")]
    #[diagnostic(code(nxkit::unknown_device), help("Run: nxkit devices"))]
    UnknownDevice { device: String },

    #[error("Failed to load configuration: {message}")]
    #[diagnostic(code(nxkit::config))]
    Config { message: String },

    #[error("Keyring error: {reason}")]
    #[diagnostic(code(nxkit::keyring))]
    Keyring { reason: String },

    // ── Output ───────────────────────────────────────────────────────
    #[error("Failed to write report to {path}")]
    #[diagnostic(
        code(nxkit::report_write),
        help("Check that the report directory exists and is writable.")
    )]
    ReportWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::Validation { .. }
            | Self::NotInteractive
            | Self::NoDevices { .. }
            | Self::UnknownDevice { .. }
            | Self::Config { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { address, reason } => {
                CliError::ConnectionFailed { address, reason }
            }
            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },
            CoreError::Timeout => CliError::Timeout,
            CoreError::Api { message, .. } => CliError::Api { message },
            CoreError::MalformedResponse { command, message } => {
                CliError::MalformedResponse { command, message }
            }
            CoreError::ProtocolViolation { field, value, max } => {
                CliError::ProtocolViolation { field, value, max }
            }
            CoreError::Emit(e) => CliError::Io(e),
            CoreError::ReportWrite { path, source } => CliError::ReportWrite { path, source },
            CoreError::Config { message } => CliError::Config { message },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::NoCredentials { device } => CliError::NoCredentials { device },
            ConfigError::UnknownDevice { device } => CliError::UnknownDevice { device },
            ConfigError::Keyring(e) => CliError::Keyring {
                reason: e.to_string(),
            },
            ConfigError::Io(e) => CliError::Io(e),
            other @ (ConfigError::Serialization(_) | ConfigError::Figment(_)) => {
                CliError::Config {
                    message: other.to_string(),
                }
            }
        }
    }
}
