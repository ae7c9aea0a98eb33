//! In-memory host world.
//!
//! Each type here implements one of the collaborator traits from
//! `teleport_core::env`:
//! - [`GridWorld`]: [`EntityWorld`](teleport_core::EntityWorld)
//! - [`PowerNetworks`]: [`PowerGrid`](teleport_core::PowerGrid)
//! - [`HazardLog`]: [`FailureEffect`](teleport_core::FailureEffect)
//! - [`ShieldBoard`]: [`AreaDefense`](teleport_core::AreaDefense)
//! - [`CueLog`]: [`PresentationHooks`](teleport_core::PresentationHooks)

mod cues;
mod grid;
mod hazards;
mod power;
mod rng;
mod shields;

pub use cues::CueLog;
pub use grid::{GridMap, GridWorld, WorldEntity};
pub use hazards::{Hazard, HazardLog};
pub use power::{Network, PowerNetworks};
pub use rng::ScatterRng;
pub use shields::{Shield, ShieldBoard};
