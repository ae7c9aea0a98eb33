//! Scenario definitions: maps, power networks, devices, entities and a script.
//!
//! A scenario is static content. The runtime turns it into a live facility and
//! host world; nothing here is mutated during a run.

use teleport_core::{
    Cell, ChargeSourceId, DeviceId, EntityId, EntityKind, Footprint, MapId, NetworkId, PadSize,
};

/// One loaded map.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapSpec {
    pub id: MapId,
    pub width: u32,
    pub height: u32,
    /// Cells nothing can be scattered onto.
    #[cfg_attr(feature = "serde", serde(default))]
    pub blocked: Vec<Cell>,
}

/// A shared power network with battery storage.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetworkSpec {
    pub id: NetworkId,
    pub stored: f32,
    pub capacity: f32,
    /// Production rate in the same unit devices bill their drain in.
    #[cfg_attr(feature = "serde", serde(default))]
    pub generation: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeviceSpecKind {
    Controller,
    Platform(PadSize),
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceSpec {
    pub id: DeviceId,
    pub kind: DeviceSpecKind,
    pub map: MapId,
    pub origin: Cell,
    #[cfg_attr(feature = "serde", serde(default = "one"))]
    pub width: u32,
    #[cfg_attr(feature = "serde", serde(default = "one"))]
    pub height: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub network: Option<NetworkId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub power_draw: Option<f32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub label: Option<String>,
}

impl DeviceSpec {
    pub fn footprint(&self) -> Footprint {
        Footprint::new(self.origin, self.width, self.height)
    }
}

#[cfg(feature = "serde")]
fn one() -> u32 {
    1
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntitySpec {
    pub id: EntityId,
    pub kind: EntityKind,
    pub map: MapId,
    pub cell: Cell,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: Option<String>,
}

/// A homing item worn by an entity.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HomerSpec {
    pub id: ChargeSourceId,
    pub holder: EntityId,
    pub charges: u32,
}

/// Area shield projector on a map.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShieldSpec {
    pub map: MapId,
    /// Owned by someone other than the operator.
    pub hostile: bool,
    #[cfg_attr(feature = "serde", serde(default = "enabled"))]
    pub active: bool,
}

#[cfg(feature = "serde")]
fn enabled() -> bool {
    true
}

/// An operator command issued at a given tick.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    Teleport {
        device: DeviceId,
        map: MapId,
        cell: Cell,
        #[cfg_attr(feature = "serde", serde(default))]
        platform: Option<DeviceId>,
    },
    Recall {
        device: DeviceId,
        anchor: EntityId,
    },
    Cancel {
        device: DeviceId,
    },
    Rename {
        device: DeviceId,
        label: String,
    },
    /// Drops a network's stored energy, e.g. to simulate a raid on the batteries.
    SetStoredEnergy {
        network: NetworkId,
        energy: f32,
    },
    SetShield {
        map: MapId,
        hostile: bool,
        active: bool,
    },
    Save,
    Load,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScriptStep {
    /// Clock value at which the command runs, before that tick is stepped.
    pub at: u64,
    pub command: Command,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scenario {
    pub name: String,
    /// Seeds arrival scatter.
    #[cfg_attr(feature = "serde", serde(default))]
    pub seed: u64,
    /// Total ticks to run.
    pub ticks: u64,
    pub maps: Vec<MapSpec>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub networks: Vec<NetworkSpec>,
    pub devices: Vec<DeviceSpec>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub entities: Vec<EntitySpec>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub homers: Vec<HomerSpec>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub shields: Vec<ShieldSpec>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub script: Vec<ScriptStep>,
}

impl Scenario {
    pub fn map(&self, id: MapId) -> Option<&MapSpec> {
        self.maps.iter().find(|map| map.id == id)
    }

    /// Commands scheduled for clock value `at`, in script order.
    pub fn commands_at(&self, at: u64) -> impl Iterator<Item = &Command> {
        self.script
            .iter()
            .filter(move |step| step.at == at)
            .map(|step| &step.command)
    }
}
