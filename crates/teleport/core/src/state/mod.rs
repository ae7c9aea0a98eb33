//! Authoritative facility state.
//!
//! Devices, their pending actions and the homing charge sources live here. The
//! host world (entities, maps, power) is never copied in; the engine reaches it
//! through [`crate::env::Env`]. Runtime layers clone or persist this state but
//! only mutate pending actions through [`crate::engine::TeleportEngine`].
mod error;
pub mod types;

use std::collections::BTreeMap;

pub use error::StateError;
pub use types::{
    ActionKind, ActionPayload, ActionState, Cell, ChargeSource, ChargeSourceId, Device,
    DeviceId, DeviceKind, EntityId, EntitySet, Footprint, Location, MapId, NetworkId, PadSize,
    RecallPayload, RecallPolicy, Tick, TeleportPayload,
};

/// Canonical snapshot of every device and charge source.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FacilityState {
    /// Ticks stepped since the facility was created.
    pub clock: Tick,
    devices: BTreeMap<DeviceId, Device>,
    charges: BTreeMap<ChargeSourceId, ChargeSource>,
}

impl FacilityState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_device(&mut self, device: Device) -> Result<(), StateError> {
        if self.devices.contains_key(&device.id) {
            return Err(StateError::DuplicateDevice { device: device.id });
        }
        self.devices.insert(device.id, device);
        Ok(())
    }

    /// Removes a device together with any action it was hosting.
    pub fn remove_device(&mut self, id: DeviceId) -> Option<Device> {
        self.devices.remove(&id)
    }

    pub fn device(&self, id: DeviceId) -> Option<&Device> {
        self.devices.get(&id)
    }

    pub fn device_mut(&mut self, id: DeviceId) -> Option<&mut Device> {
        self.devices.get_mut(&id)
    }

    /// Devices in id order.
    pub fn devices(&self) -> impl Iterator<Item = &Device> {
        self.devices.values()
    }

    pub fn add_charge_source(&mut self, source: ChargeSource) -> Result<(), StateError> {
        if self.charges.contains_key(&source.id) {
            return Err(StateError::DuplicateChargeSource { charge: source.id });
        }
        self.charges.insert(source.id, source);
        Ok(())
    }

    pub fn charge(&self, id: ChargeSourceId) -> Option<&ChargeSource> {
        self.charges.get(&id)
    }

    pub fn charge_mut(&mut self, id: ChargeSourceId) -> Option<&mut ChargeSource> {
        self.charges.get_mut(&id)
    }

    pub fn charges(&self) -> impl Iterator<Item = &ChargeSource> {
        self.charges.values()
    }

    /// First charge source worn by `entity` that is allowed to recall.
    pub fn charge_for(&self, entity: EntityId, policy: RecallPolicy) -> Option<ChargeSourceId> {
        self.charges
            .values()
            .find(|source| source.holder == Some(entity) && source.can_recall(policy))
            .map(|source| source.id)
    }

    /// Wearers that could start a recall right now, one entry per charge source.
    pub fn recall_candidates(&self, policy: RecallPolicy) -> Vec<(EntityId, ChargeSourceId)> {
        self.charges
            .values()
            .filter(|source| source.can_recall(policy))
            .filter_map(|source| source.holder.map(|holder| (holder, source.id)))
            .collect()
    }

    /// Platforms sharing `network`, in id order.
    pub fn platforms_on(&self, network: NetworkId) -> impl Iterator<Item = &Device> {
        self.devices
            .values()
            .filter(move |device| device.is_platform() && device.network == Some(network))
    }

    /// The platform recalls land on: a large pad if the network has one, else
    /// the lowest-id small pad.
    pub fn linked_platform(&self, network: NetworkId) -> Option<&Device> {
        self.platforms_on(network)
            .find(|device| device.pad_size() == Some(PadSize::Large))
            .or_else(|| self.platforms_on(network).next())
    }

    /// Devices currently hosting an action, in id order.
    pub fn pending_devices(&self) -> Vec<DeviceId> {
        self.devices
            .values()
            .filter(|device| !device.is_idle())
            .map(|device| device.id)
            .collect()
    }

    /// Drops every pending action so all devices come back Idle. Returns how
    /// many actions were discarded.
    pub fn reset_pending_actions(&mut self) -> usize {
        self.devices
            .values_mut()
            .filter_map(Device::clear_pending)
            .count()
    }
}
