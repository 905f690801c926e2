use thiserror::Error;

/// Top-level error type for the `nxkit-api` crate.
///
/// Covers every failure mode of a single NX-API round trip: transport,
/// authentication, JSON-RPC errors reported by the switch, and response
/// bodies that don't match the expected schema. `nxkit-core` maps these
/// into per-device diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The switch rejected the basic-auth credentials.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// Non-success HTTP status without a JSON-RPC error body.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    // ── NX-API ──────────────────────────────────────────────────────
    /// JSON-RPC error object returned by the switch (bad command, etc.)
    #[error("NX-API error {code} for `{command}`: {message}")]
    Rpc {
        command: String,
        code: i64,
        message: String,
    },

    /// The response parsed as JSON but an expected key path is missing
    /// or has the wrong shape.
    #[error("Malformed `{command}` response: {message}")]
    MalformedResponse { command: String, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// The response body is not JSON at all, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}
