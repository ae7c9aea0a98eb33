use super::common::{ChargeSourceId, DeviceId, EntityId, Location, MapId};

/// The two actions a device can power up for.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionKind {
    Teleport,
    Recall,
}

/// Ordered, duplicate-free batch of entities selected for one relocation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct EntitySet(Vec<EntityId>);

impl EntitySet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends `entity` unless already present. Returns whether it was added.
    pub fn insert(&mut self, entity: EntityId) -> bool {
        if self.0.contains(&entity) {
            return false;
        }
        self.0.push(entity);
        true
    }

    pub fn contains(&self, entity: EntityId) -> bool {
        self.0.contains(&entity)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[EntityId] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<EntityId> for EntitySet {
    fn from_iter<I: IntoIterator<Item = EntityId>>(iter: I) -> Self {
        let mut set = Self::new();
        for entity in iter {
            set.insert(entity);
        }
        set
    }
}

/// Forward teleport payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TeleportPayload {
    pub destination: Location,
    /// Platform whose footprint is emptied on completion.
    pub platform: DeviceId,
    /// Map where friendly area defenses are suppressed while charging.
    pub source_map: MapId,
}

/// Recall payload. The entity set is fixed when the recall starts.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecallPayload {
    pub anchor: EntityId,
    pub entities: EntitySet,
    pub charge: ChargeSourceId,
    /// Platform whose footprint receives the recalled entities.
    pub platform: DeviceId,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionPayload {
    Teleport(TeleportPayload),
    Recall(RecallPayload),
}

impl ActionPayload {
    pub fn kind(&self) -> ActionKind {
        match self {
            ActionPayload::Teleport(_) => ActionKind::Teleport,
            ActionPayload::Recall(_) => ActionKind::Recall,
        }
    }
}

/// In-progress power-up owned by exactly one device.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionState {
    pub kind: ActionKind,
    elapsed: u32,
    pub required: u32,
    /// Drain billed on the most recent tick.
    pub drain_rate: f32,
    pub payload: ActionPayload,
}

impl ActionState {
    pub fn new(required: u32, payload: ActionPayload) -> Self {
        Self {
            kind: payload.kind(),
            elapsed: 0,
            required,
            drain_rate: 0.0,
            payload,
        }
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    /// Advances the timer by one tick and returns the new elapsed count.
    pub(crate) fn advance(&mut self) -> u32 {
        self.elapsed = self.elapsed.saturating_add(1);
        self.elapsed
    }

    pub fn is_charged(&self) -> bool {
        self.elapsed >= self.required
    }

    pub fn remaining(&self) -> u32 {
        self.required.saturating_sub(self.elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_set_keeps_first_insertion_order() {
        let set: EntitySet = [EntityId(3), EntityId(1), EntityId(3), EntityId(2)]
            .into_iter()
            .collect();
        assert_eq!(set.as_slice(), &[EntityId(3), EntityId(1), EntityId(2)]);
    }

    #[test]
    fn action_state_charges_after_required_ticks() {
        let payload = ActionPayload::Recall(RecallPayload {
            anchor: EntityId(1),
            entities: EntitySet::new(),
            charge: ChargeSourceId(1),
            platform: DeviceId(2),
        });
        let mut action = ActionState::new(3, payload);
        assert_eq!(action.kind, ActionKind::Recall);
        assert_eq!(action.advance(), 1);
        assert_eq!(action.remaining(), 2);
        action.advance();
        assert!(!action.is_charged());
        action.advance();
        assert!(action.is_charged());
    }
}
