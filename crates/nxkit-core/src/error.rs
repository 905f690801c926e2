// ── Core error types ──
//
// Per-device errors from nxkit-core. The `From<nxkit_api::Error>` impl
// folds transport-layer failures into the three categories an operator
// cares about: the switch was unreachable, it answered with something we
// can't read, or it answered with values outside the protocol's range.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Transport failures ───────────────────────────────────────────
    #[error("Cannot connect to {address}: {reason}")]
    ConnectionFailed { address: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Request timed out")]
    Timeout,

    #[error("API error: {message}")]
    Api {
        message: String,
        /// JSON-RPC error code, if the switch returned one.
        code: Option<i64>,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Response errors ──────────────────────────────────────────────
    #[error("Malformed `{command}` response: {message}")]
    MalformedResponse { command: String, message: String },

    #[error("Protocol violation: `{field}` = {value} exceeds the maximum of {max}")]
    ProtocolViolation { field: String, value: u64, max: u64 },

    // ── Output errors ────────────────────────────────────────────────
    #[error("Failed to emit report: {0}")]
    Emit(#[from] std::io::Error),

    #[error("Failed to write report to {path}")]
    ReportWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<nxkit_api::Error> for CoreError {
    fn from(err: nxkit_api::Error) -> Self {
        match err {
            nxkit_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            nxkit_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        address: e
                            .url()
                            .and_then(|u| u.host_str().map(str::to_owned))
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        code: None,
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            nxkit_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid device address: {e}"),
            },
            nxkit_api::Error::Tls(reason) => CoreError::Config {
                message: format!("TLS setup failed: {reason}"),
            },
            nxkit_api::Error::Http { status, message } => CoreError::Api {
                message,
                code: None,
                status: Some(status),
            },
            nxkit_api::Error::Rpc {
                command,
                code,
                message,
            } => CoreError::Api {
                message: format!("`{command}` rejected: {message}"),
                code: Some(code),
                status: None,
            },
            nxkit_api::Error::MalformedResponse { command, message } => {
                CoreError::MalformedResponse { command, message }
            }
            nxkit_api::Error::Deserialization { message, body: _ } => {
                CoreError::MalformedResponse {
                    command: "<unknown>".into(),
                    message,
                }
            }
        }
    }
}
