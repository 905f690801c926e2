// nxkit-api: Async Rust client for the Nexus NX-API (JSON-RPC over HTTP)

pub mod client;
pub mod commands;
pub mod error;
pub mod models;
pub mod transport;

pub use client::NxapiClient;
pub use commands::CliCommand;
pub use error::Error;
pub use models::{
    CdpNeighborRow, InterfaceRow, ShowCdpNeighborsDetail, ShowInterface, ShowVersion,
    counter_value, decode_body,
};
pub use transport::{Scheme, TlsMode, TransportConfig};
