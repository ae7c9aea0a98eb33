//! Area-denial shield projectors, one optional capability of the host.

use teleport_core::{AreaDefense, MapId};
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Shield {
    pub map: MapId,
    /// Not owned by the operator.
    pub hostile: bool,
    pub active: bool,
    suppressed: bool,
}

impl Shield {
    pub fn new(map: MapId, hostile: bool, active: bool) -> Self {
        Self {
            map,
            hostile,
            active,
            suppressed: false,
        }
    }

    pub fn is_up(&self) -> bool {
        self.active && !self.suppressed
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }
}

#[derive(Clone, Debug, Default)]
pub struct ShieldBoard {
    shields: Vec<Shield>,
}

impl ShieldBoard {
    pub fn new(shields: impl IntoIterator<Item = Shield>) -> Self {
        Self {
            shields: shields.into_iter().collect(),
        }
    }

    pub fn shields(&self) -> &[Shield] {
        &self.shields
    }

    /// Switches every shield of the given allegiance on `map`, adding one if none exists.
    pub fn set(&mut self, map: MapId, hostile: bool, active: bool) {
        let mut found = false;
        for shield in self
            .shields
            .iter_mut()
            .filter(|shield| shield.map == map && shield.hostile == hostile)
        {
            shield.active = active;
            found = true;
        }
        if !found {
            self.shields.push(Shield::new(map, hostile, active));
        }
    }

    fn friendly_on(&mut self, map: MapId) -> impl Iterator<Item = &mut Shield> {
        self.shields
            .iter_mut()
            .filter(move |shield| shield.map == map && !shield.hostile)
    }
}

impl AreaDefense for ShieldBoard {
    fn has_active_hostile_defense(&self, map: MapId) -> bool {
        self.shields
            .iter()
            .any(|shield| shield.map == map && shield.hostile && shield.is_up())
    }

    fn suppress_friendly(&mut self, map: MapId) {
        debug!(%map, "suppressing friendly shields");
        for shield in self.friendly_on(map) {
            shield.suppressed = true;
        }
    }

    fn restore_friendly(&mut self, map: MapId) {
        debug!(%map, "restoring friendly shields");
        for shield in self.friendly_on(map) {
            shield.suppressed = false;
        }
    }
}
