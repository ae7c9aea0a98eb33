//! Builds a live [`Simulation`] from a scenario definition.
//!
//! Scenarios are static content from `teleport-content`; this module allocates
//! the host world, power networks, devices and homing items they describe.

use teleport_content::{DeviceSpec, DeviceSpecKind, Scenario};
use teleport_core::{
    ChargeSource, Device, DeviceKind, FacilityState, Location, MapDimensions, PowerGrid,
    TeleportConfig,
};

use crate::capabilities::CapabilityRegistry;
use crate::error::Result;
use crate::simulation::Simulation;
use crate::world::{GridMap, GridWorld, Network, PowerNetworks, WorldEntity};

/// Initialize a simulation from this scenario.
pub fn build_simulation(scenario: &Scenario, config: TeleportConfig) -> Result<Simulation> {
    tracing::info!(
        "Creating simulation from scenario '{}' ({} maps, {} devices, {} entities)",
        scenario.name,
        scenario.maps.len(),
        scenario.devices.len(),
        scenario.entities.len()
    );

    let mut world = GridWorld::new(scenario.seed);
    for map in &scenario.maps {
        world.add_map(
            map.id,
            GridMap::new(
                MapDimensions::new(map.width, map.height),
                map.blocked.iter().copied(),
            ),
        );
    }
    for spec in &scenario.entities {
        let mut entity = WorldEntity::new(spec.kind, Location::new(spec.map, spec.cell));
        if let Some(name) = &spec.name {
            entity = entity.named(name.clone());
        }
        world.insert_entity(spec.id, entity);
    }

    let mut power = PowerNetworks::new();
    for net in &scenario.networks {
        power.add_network(
            net.id,
            Network::new(net.stored, net.capacity, net.generation),
        );
    }

    let mut state = FacilityState::new();
    for spec in &scenario.devices {
        let device = device_from_spec(spec);
        if let Some(network) = device.network {
            power.set_drain_rate(network, device.id, device.idle_drain());
        }
        tracing::debug!("Placed {} at {}", device.display_label(), device.location());
        state.add_device(device)?;
    }
    for homer in &scenario.homers {
        state.add_charge_source(ChargeSource::new(homer.id, homer.charges).worn_by(homer.holder))?;
    }

    Ok(Simulation::new(config, world, power)
        .with_state(state)
        .with_capabilities(CapabilityRegistry::detect(&scenario.shields)))
}

fn device_from_spec(spec: &DeviceSpec) -> Device {
    let kind = match spec.kind {
        DeviceSpecKind::Controller => DeviceKind::Controller,
        DeviceSpecKind::Platform(size) => DeviceKind::Platform(size),
    };
    let mut device = Device::new(spec.id, kind, spec.map, spec.footprint());
    device.network = spec.network;
    device.power_draw = spec.power_draw;
    if let Some(label) = &spec.label {
        device.set_label(label);
    }
    device
}
