// ── Query transport ──
//
// The session talks to switches through `Transport` so tests can swap in
// canned responses. `HttpTransport` is the real NX-API path.

use std::future::Future;

use nxkit_api::{CliCommand, NxapiClient, TransportConfig};
use serde_json::Value;
use tracing::debug;

use crate::model::DeviceCredential;

/// Runs one CLI command on one device and returns its `result.body`.
pub trait Transport {
    fn query(
        &self,
        device: &DeviceCredential,
        command: CliCommand,
    ) -> impl Future<Output = Result<Value, nxkit_api::Error>> + Send;
}

/// NX-API over HTTP(S). Builds a fresh client for every request.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    config: TransportConfig,
}

impl HttpTransport {
    pub fn new(config: TransportConfig) -> Self {
        Self { config }
    }
}

impl Transport for HttpTransport {
    async fn query(
        &self,
        device: &DeviceCredential,
        command: CliCommand,
    ) -> Result<Value, nxkit_api::Error> {
        let client = NxapiClient::new(
            &device.address,
            device.username.clone(),
            device.password.clone(),
            &self.config,
        )?;
        debug!(device = %device.name, endpoint = %client.endpoint(), %command, "querying");
        client.cli(command).await
    }
}
