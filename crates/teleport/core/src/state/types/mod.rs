mod action;
mod charge;
mod common;
mod device;

pub use action::{
    ActionKind, ActionPayload, ActionState, EntitySet, RecallPayload, TeleportPayload,
};
pub use charge::{ChargeSource, RecallPolicy};
pub use common::{
    Cell, ChargeSourceId, DeviceId, EntityId, Footprint, Location, MapId, NetworkId, Tick,
};
pub use device::{Device, DeviceKind, PadSize};
