//! Scenario loader.

use std::collections::BTreeSet;
use std::path::Path;

use teleport_core::MapDimensions;

use crate::loaders::{LoadResult, read_file};
use crate::scenario::{Command, DeviceSpecKind, Scenario};

/// Loader for [`Scenario`] files written in RON.
///
/// Parsing is followed by a reference check so that a scenario never names a
/// map, network, device or entity it does not declare.
pub struct ScenarioLoader;

impl ScenarioLoader {
    pub fn load(path: &Path) -> LoadResult<Scenario> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid scenario {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<Scenario> {
        let scenario: Scenario = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scenario RON: {}", e))?;
        Self::validate(&scenario)?;
        Ok(scenario)
    }

    fn validate(scenario: &Scenario) -> LoadResult<()> {
        let mut maps = BTreeSet::new();
        for map in &scenario.maps {
            if map.width == 0 || map.height == 0 {
                anyhow::bail!("{} has zero area", map.id);
            }
            if !maps.insert(map.id) {
                anyhow::bail!("{} declared twice", map.id);
            }
        }
        let bounds = |id| {
            scenario
                .map(id)
                .map(|map| MapDimensions::new(map.width, map.height))
                .ok_or_else(|| anyhow::anyhow!("unknown {}", id))
        };

        let networks: BTreeSet<_> = scenario.networks.iter().map(|net| net.id).collect();
        if networks.len() != scenario.networks.len() {
            anyhow::bail!("duplicate network id");
        }

        let mut devices = BTreeSet::new();
        for device in &scenario.devices {
            if !devices.insert(device.id) {
                anyhow::bail!("{} declared twice", device.id);
            }
            let dims = bounds(device.map)?;
            let footprint = device.footprint();
            if footprint.cells().iter().any(|cell| !dims.contains(*cell)) {
                anyhow::bail!("{} footprint leaves {}", device.id, device.map);
            }
            if let Some(network) = device.network
                && !networks.contains(&network)
            {
                anyhow::bail!("{} is wired to unknown {}", device.id, network);
            }
            if matches!(device.kind, DeviceSpecKind::Controller)
                && (device.width, device.height) != (1, 1)
            {
                anyhow::bail!("controller {} must occupy a single cell", device.id);
            }
        }

        let mut entities = BTreeSet::new();
        for entity in &scenario.entities {
            if !entities.insert(entity.id) {
                anyhow::bail!("{} declared twice", entity.id);
            }
            if !bounds(entity.map)?.contains(entity.cell) {
                anyhow::bail!("{} placed outside {}", entity.id, entity.map);
            }
        }

        let mut homers = BTreeSet::new();
        for homer in &scenario.homers {
            if !homers.insert(homer.id) {
                anyhow::bail!("{} declared twice", homer.id);
            }
            if !entities.contains(&homer.holder) {
                anyhow::bail!("{} is worn by unknown {}", homer.id, homer.holder);
            }
        }

        for shield in &scenario.shields {
            bounds(shield.map)?;
        }

        for step in &scenario.script {
            if step.at > scenario.ticks {
                anyhow::bail!(
                    "script step at tick {} is past the end ({})",
                    step.at,
                    scenario.ticks
                );
            }
            match &step.command {
                Command::Teleport {
                    device,
                    map,
                    platform,
                    ..
                } => {
                    Self::known(&devices, *device)?;
                    bounds(*map)?;
                    if let Some(platform) = platform {
                        Self::known(&devices, *platform)?;
                    }
                }
                Command::Recall { device, anchor } => {
                    Self::known(&devices, *device)?;
                    Self::known(&entities, *anchor)?;
                }
                Command::Cancel { device } | Command::Rename { device, .. } => {
                    Self::known(&devices, *device)?;
                }
                Command::SetStoredEnergy { network, .. } => {
                    Self::known(&networks, *network)?;
                }
                Command::SetShield { map, .. } => {
                    bounds(*map)?;
                }
                Command::Save | Command::Load => {}
            }
        }
        Ok(())
    }

    fn known<T: Ord + std::fmt::Display>(set: &BTreeSet<T>, id: T) -> LoadResult<()> {
        if set.contains(&id) {
            Ok(())
        } else {
            Err(anyhow::anyhow!("script references unknown {}", id))
        }
    }
}

#[cfg(test)]
mod tests {
    use teleport_core::{Cell, DeviceId, MapId, PadSize};

    use super::*;

    const OUTPOST: &str = r#"(
        name: "outpost",
        seed: 7,
        ticks: 400,
        maps: [(id: 0, width: 20, height: 20), (id: 1, width: 30, height: 30)],
        networks: [(id: 1, stored: 5000.0, capacity: 10000.0)],
        devices: [
            (id: 1, kind: Controller, map: 0, origin: (x: 1, z: 1), network: Some(1), power_draw: Some(2.0)),
            (id: 2, kind: Platform(Small), map: 0, origin: (x: 4, z: 4), width: 2, height: 2, network: Some(1)),
        ],
        entities: [(id: 10, kind: Agent, map: 0, cell: (x: 4, z: 4), name: Some("Ada"))],
        homers: [(id: 1, holder: 10, charges: 2)],
        script: [
            (at: 0, command: Teleport(device: 1, map: 1, cell: (x: 15, z: 15), platform: Some(2))),
        ],
    )"#;

    #[test]
    fn parses_outpost_scenario() {
        let scenario = ScenarioLoader::parse(OUTPOST).unwrap();
        assert_eq!(scenario.name, "outpost");
        assert_eq!(scenario.devices[1].kind, DeviceSpecKind::Platform(PadSize::Small));
        assert_eq!(scenario.devices[1].footprint().cells().len(), 4);
        assert_eq!(scenario.devices[0].width, 1);
        assert_eq!(scenario.networks[0].generation, 0.0);

        let first: Vec<_> = scenario.commands_at(0).collect();
        assert_eq!(
            first,
            vec![&Command::Teleport {
                device: DeviceId(1),
                map: MapId(1),
                cell: Cell::new(15, 15),
                platform: Some(DeviceId(2)),
            }]
        );
    }

    #[test]
    fn rejects_unknown_references() {
        let bad_network =
            OUTPOST.replace("network: Some(1), power_draw", "network: Some(9), power_draw");
        assert!(ScenarioLoader::parse(&bad_network).is_err());

        let bad_holder = OUTPOST.replace("holder: 10", "holder: 11");
        assert!(ScenarioLoader::parse(&bad_holder).is_err());

        let bad_script = OUTPOST.replace("Teleport(device: 1", "Teleport(device: 5");
        assert!(ScenarioLoader::parse(&bad_script).is_err());
    }

    #[test]
    fn rejects_footprint_outside_map() {
        let off_edge = OUTPOST.replace("origin: (x: 4, z: 4)", "origin: (x: 19, z: 19)");
        assert!(ScenarioLoader::parse(&off_edge).is_err());
    }
}
