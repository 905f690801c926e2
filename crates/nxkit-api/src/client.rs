// NX-API HTTP client
//
// Wraps `reqwest::Client` with endpoint construction, basic auth, and
// JSON-RPC envelope unwrapping. The typed `show_*` commands live in
// `commands.rs` to keep this module focused on transport mechanics.

use reqwest::header::CONTENT_TYPE;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use crate::commands::CliCommand;
use crate::error::Error;
use crate::models::{JsonRpcRequest, JsonRpcResponse};
use crate::transport::{Scheme, TransportConfig};

/// NX-API rejects `application/json` for JSON-RPC requests.
const JSON_RPC_CONTENT_TYPE: &str = "application/json-rpc";

/// Raw HTTP client for one switch's NX-API endpoint.
///
/// Sends `cli` JSON-RPC calls to `{scheme}://{address}/ins` with basic auth
/// and returns the unwrapped `result.body` -- the envelope is stripped
/// before the caller sees it.
pub struct NxapiClient {
    http: reqwest::Client,
    endpoint: Url,
    username: String,
    password: SecretString,
}

impl NxapiClient {
    /// Create a client for the switch at `address` (host or host:port).
    ///
    /// An address that already carries a scheme (`https://10.0.0.1`) is
    /// used as-is and only the `/ins` path is applied.
    pub fn new(
        address: &str,
        username: impl Into<String>,
        password: SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let endpoint = endpoint_url(transport.scheme, address)?;
        let http = transport.build_client()?;
        Ok(Self {
            http,
            endpoint,
            username: username.into(),
            password,
        })
    }

    /// Create a client with a pre-built `reqwest::Client` and a full endpoint URL.
    pub fn with_client(
        http: reqwest::Client,
        endpoint: Url,
        username: impl Into<String>,
        password: SecretString,
    ) -> Self {
        Self {
            http,
            endpoint,
            username: username.into(),
            password,
        }
    }

    /// The `/ins` endpoint this client posts to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Run one CLI command and return its `result.body`.
    pub async fn cli(&self, command: CliCommand) -> Result<Value, Error> {
        debug!(endpoint = %self.endpoint, %command, "POST NX-API cli");

        let request = JsonRpcRequest::cli(command.as_str());
        let resp = self
            .http
            .post(self.endpoint.clone())
            .basic_auth(&self.username, Some(self.password.expose_secret()))
            .header(CONTENT_TYPE, JSON_RPC_CONTENT_TYPE)
            .json(&request)
            .send()
            .await
            .map_err(Error::Transport)?;

        self.parse_envelope(command, resp).await
    }

    /// Parse the JSON-RPC reply, returning `result.body` on success.
    ///
    /// NX-API reports CLI failures as a JSON-RPC `error` object, usually
    /// with HTTP 500, so the body is inspected before the status code.
    async fn parse_envelope(
        &self,
        command: CliCommand,
        resp: reqwest::Response,
    ) -> Result<Value, Error> {
        let status = resp.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication {
                message: format!("invalid credentials for {}", self.username),
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;
        trace!(%status, len = body.len(), "NX-API reply received");

        let reply = match serde_json::from_str::<Value>(&body) {
            Ok(value) => first_reply(value),
            Err(e) if status.is_success() => {
                return Err(Error::Deserialization {
                    message: format!("{e} (body preview: {:?})", preview(&body)),
                    body,
                });
            }
            Err(_) => {
                return Err(Error::Http {
                    status: status.as_u16(),
                    message: preview(&body).to_owned(),
                });
            }
        };

        let reply: JsonRpcResponse =
            serde_json::from_value(reply).map_err(|e| Error::MalformedResponse {
                command: command.to_string(),
                message: format!("not a JSON-RPC reply: {e}"),
            })?;

        if let Some(err) = reply.error {
            return Err(Error::Rpc {
                command: command.to_string(),
                code: err.code,
                message: err.detail(),
            });
        }

        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                message: preview(&body).to_owned(),
            });
        }

        reply
            .result
            .and_then(|r| r.body)
            .ok_or_else(|| Error::MalformedResponse {
                command: command.to_string(),
                message: "missing `result.body`".into(),
            })
    }
}

/// Build `{scheme}://{address}/ins`.
fn endpoint_url(scheme: Scheme, address: &str) -> Result<Url, Error> {
    let address = address.trim().trim_end_matches('/');
    let mut url = if address.contains("://") {
        Url::parse(address)?
    } else {
        Url::parse(&format!("{scheme}://{address}"))?
    };
    url.set_path("/ins");
    Ok(url)
}

/// Batched requests come back as an array; we only ever send one call.
fn first_reply(value: Value) -> Value {
    match value {
        Value::Array(items) => items.into_iter().next().unwrap_or(Value::Null),
        other => other,
    }
}

fn preview(body: &str) -> &str {
    let end = body
        .char_indices()
        .nth(200)
        .map_or(body.len(), |(idx, _)| idx);
    &body[..end]
}
