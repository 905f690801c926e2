// ── Domain model ──
//
// Typed views of what the switch reports, decoupled from the NX-API wire
// schemas in `nxkit_api::models`. `convert` builds these; `metrics` and
// `render` consume them.

pub mod device;
pub mod interface;
pub mod neighbor;

pub use device::{DeviceCredential, DeviceIdentity};
pub use interface::{
    InterfaceFilter, InterfaceHealthRow, InterfaceRawSample, InterfaceStatus, NamedInterface,
    Percent,
};
pub use neighbor::NeighborRecord;
