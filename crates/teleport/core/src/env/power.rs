use crate::state::{DeviceId, NetworkId};

/// Shared power networks as seen by the state machine.
///
/// Each device writes its own consumption rate; how rates are aggregated into
/// stored energy is entirely up to the host.
pub trait PowerGrid {
    /// Whether `network` resolves to a live network.
    fn has_network(&self, network: NetworkId) -> bool;

    /// Energy currently held in the network's storage.
    fn stored_energy(&self, network: NetworkId) -> f32;

    /// Replaces the consumption rate billed by `device`. Takes effect immediately.
    fn set_drain_rate(&mut self, network: NetworkId, device: DeviceId, rate: f32);
}
