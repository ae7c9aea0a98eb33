//! Shared power networks with battery storage.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use teleport_core::{DeviceId, NetworkId, PowerGrid};
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Network {
    pub stored: f32,
    pub capacity: f32,
    /// Production rate, billed against the summed device drain every tick.
    pub generation: f32,
    drains: BTreeMap<DeviceId, f32>,
}

impl Network {
    pub fn new(stored: f32, capacity: f32, generation: f32) -> Self {
        Self {
            stored: stored.clamp(0.0, capacity),
            capacity,
            generation,
            drains: BTreeMap::new(),
        }
    }

    pub fn drain_of(&self, device: DeviceId) -> Option<f32> {
        self.drains.get(&device).copied()
    }

    pub fn total_drain(&self) -> f32 {
        self.drains.values().sum()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PowerNetworks {
    networks: BTreeMap<NetworkId, Network>,
}

impl PowerNetworks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_network(&mut self, id: NetworkId, network: Network) {
        self.networks.insert(id, network);
    }

    pub fn network(&self, id: NetworkId) -> Option<&Network> {
        self.networks.get(&id)
    }

    /// Overwrites stored energy, clamped to capacity. Returns `false` for an unknown network.
    pub fn set_stored(&mut self, id: NetworkId, energy: f32) -> bool {
        match self.networks.get_mut(&id) {
            Some(network) => {
                network.stored = energy.clamp(0.0, network.capacity);
                true
            }
            None => false,
        }
    }

    /// Integrates one tick of net flow into every battery.
    ///
    /// `energy_window` converts rates into energy per tick, matching the
    /// sufficiency check the engine applies.
    pub fn settle(&mut self, energy_window: f32) {
        for (id, network) in &mut self.networks {
            let flow = (network.generation - network.total_drain()) / energy_window;
            let before = network.stored;
            network.stored = (network.stored + flow).clamp(0.0, network.capacity);
            if before > 0.0 && network.stored == 0.0 {
                debug!(network = %id, "battery bank drained");
            }
        }
    }
}

impl PowerGrid for PowerNetworks {
    fn has_network(&self, network: NetworkId) -> bool {
        self.networks.contains_key(&network)
    }

    fn stored_energy(&self, network: NetworkId) -> f32 {
        self.networks
            .get(&network)
            .map_or(0.0, |network| network.stored)
    }

    fn set_drain_rate(&mut self, network: NetworkId, device: DeviceId, rate: f32) {
        if let Some(network) = self.networks.get_mut(&network) {
            network.drains.insert(device, rate);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NET: NetworkId = NetworkId(1);

    #[test]
    fn drain_rate_replaces_previous_request() {
        let mut grid = PowerNetworks::new();
        grid.add_network(NET, Network::new(10.0, 100.0, 0.0));
        grid.set_drain_rate(NET, DeviceId(1), 2_000.0);
        grid.set_drain_rate(NET, DeviceId(1), 2.0);
        grid.set_drain_rate(NET, DeviceId(2), 1.0);
        assert_eq!(grid.network(NET).unwrap().total_drain(), 3.0);

        grid.set_drain_rate(NetworkId(9), DeviceId(1), 5.0);
        assert!(!grid.has_network(NetworkId(9)));
    }

    #[test]
    fn settle_integrates_and_clamps() {
        let mut grid = PowerNetworks::new();
        grid.add_network(NET, Network::new(1.0, 2.0, 0.0));
        grid.set_drain_rate(NET, DeviceId(1), 600.0);

        grid.settle(60.0);
        assert_eq!(grid.stored_energy(NET), 0.0);

        grid.set_drain_rate(NET, DeviceId(1), 0.0);
        assert!(grid.set_stored(NET, 50.0));
        assert_eq!(grid.stored_energy(NET), 2.0);
        assert!(!grid.set_stored(NetworkId(3), 1.0));
    }
}
