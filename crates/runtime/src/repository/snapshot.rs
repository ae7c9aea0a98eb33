use std::str::FromStr;

use serde::{Deserialize, Serialize};
use teleport_core::FacilityState;

use crate::world::{GridWorld, HazardLog, PowerNetworks};

/// Everything that changes during a run and survives a save.
///
/// Shields and cosmetic cues are not saved: shield suppression is derived from
/// the pending teleports on load.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub facility: FacilityState,
    pub world: GridWorld,
    pub power: PowerNetworks,
    pub hazards: HazardLog,
}

/// What happens to actions that were charging when a snapshot was taken.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadPolicy {
    /// Pending actions resume exactly where they were.
    #[default]
    Preserve,
    /// Pending actions are dropped and every device loads Idle.
    ResetToIdle,
}

impl FromStr for LoadPolicy {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "preserve" => Ok(LoadPolicy::Preserve),
            "reset_to_idle" | "reset" => Ok(LoadPolicy::ResetToIdle),
            other => Err(format!("unknown load policy '{other}'")),
        }
    }
}
