#![allow(dead_code)]

use runtime::{Simulation, build_simulation};
use teleport_content::{Scenario, ScenarioLoader};
use teleport_core::{Cell, DeviceId, EntityId, Location, MapId, NetworkId, TeleportConfig};

pub const HOME: MapId = MapId(0);
pub const AWAY: MapId = MapId(1);
pub const NET: NetworkId = NetworkId(1);
pub const CONSOLE: DeviceId = DeviceId(1);
pub const PAD: DeviceId = DeviceId(2);
pub const ADA: EntityId = EntityId(10);
pub const CRATE: EntityId = EntityId(11);
pub const BEACON: EntityId = EntityId(12);
pub const SCOUT: EntityId = EntityId(20);
pub const MEDIC: EntityId = EntityId(21);
pub const STRAGGLER: EntityId = EntityId(22);

pub const OUTPOST: &str = r#"(
    name: "outpost",
    seed: 3,
    ticks: 800,
    maps: [(id: 0, width: 20, height: 20), (id: 1, width: 30, height: 30)],
    networks: [(id: 1, stored: 1000.0, capacity: 1000.0, generation: 2100.0)],
    devices: [
        (id: 1, kind: Controller, map: 0, origin: (x: 1, z: 1), network: Some(1), power_draw: Some(2.0)),
        (id: 2, kind: Platform(Small), map: 0, origin: (x: 4, z: 4), width: 2, height: 2, network: Some(1)),
    ],
    entities: [
        (id: 10, kind: Agent, map: 0, cell: (x: 4, z: 4), name: Some("Ada")),
        (id: 11, kind: Item, map: 0, cell: (x: 5, z: 5)),
        (id: 12, kind: Structure, map: 0, cell: (x: 5, z: 4), name: Some("Beacon")),
        (id: 20, kind: Agent, map: 1, cell: (x: 10, z: 10), name: Some("Scout")),
        (id: 21, kind: Agent, map: 1, cell: (x: 11, z: 10)),
        (id: 22, kind: Agent, map: 1, cell: (x: 14, z: 14)),
    ],
    homers: [(id: 1, holder: 20, charges: 3)],
    shields: [(map: 0, hostile: false), (map: 1, hostile: true, active: false)],
    script: [
        (at: 0, command: Teleport(device: 1, map: 1, cell: (x: 20, z: 20), platform: Some(2))),
        (at: 5, command: Cancel(device: 2)),
        (at: 370, command: Save),
    ],
)"#;

pub fn scenario(source: &str) -> Scenario {
    ScenarioLoader::parse(source).expect("fixture scenario parses")
}

pub fn outpost() -> Simulation {
    build_simulation(&scenario(OUTPOST), TeleportConfig::default()).expect("fixture builds")
}

/// Outpost whose battery holds barely a second of charging.
pub fn blackout() -> Simulation {
    let source = OUTPOST.replace(
        "stored: 1000.0, capacity: 1000.0, generation: 2100.0",
        "stored: 1.0, capacity: 1000.0, generation: 0.0",
    );
    build_simulation(&scenario(&source), TeleportConfig::default()).expect("fixture builds")
}

pub fn destination() -> Location {
    Location::new(AWAY, Cell::new(20, 20))
}
