use super::common::{ChargeSourceId, EntityId, Location};

/// Decides what a homing charge needs before it may be recalled.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RecallPolicy {
    /// Any remaining charge is enough.
    #[default]
    ChargesOnly,
    /// A charge is also needed and the wearer must have arrived somewhere by
    /// forward teleport at least once.
    RequireLastTeleport,
}

/// Consumable recall charges carried on a worn homing item.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChargeSource {
    pub id: ChargeSourceId,
    /// Entity currently wearing the item.
    pub holder: Option<EntityId>,
    remaining: u32,
    capacity: u32,
    last_teleport: Option<Location>,
}

impl ChargeSource {
    /// Fresh item filled to `capacity`. Deserialized items keep their stored count.
    pub fn new(id: ChargeSourceId, capacity: u32) -> Self {
        Self {
            id,
            holder: None,
            remaining: capacity,
            capacity,
            last_teleport: None,
        }
    }

    pub fn worn_by(mut self, holder: EntityId) -> Self {
        self.holder = Some(holder);
        self
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn last_teleport(&self) -> Option<Location> {
        self.last_teleport
    }

    pub fn can_recall(&self, policy: RecallPolicy) -> bool {
        match policy {
            RecallPolicy::ChargesOnly => self.remaining > 0,
            RecallPolicy::RequireLastTeleport => {
                self.remaining > 0 && self.last_teleport.is_some()
            }
        }
    }

    /// Spends one charge. No-op when already empty.
    pub fn consume(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    /// Host-side refuel. The core never calls this.
    pub fn recharge(&mut self, charges: u32) -> u32 {
        let before = self.remaining;
        self.remaining = self.remaining.saturating_add(charges).min(self.capacity);
        self.remaining - before
    }

    pub(crate) fn remember_teleport(&mut self, location: Location) {
        self.last_teleport = Some(location);
    }
}
