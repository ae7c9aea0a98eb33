//! Records the in-world penalties of failed charges.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use teleport_core::{Cell, DeviceId, FailureEffect, MapId};
use tracing::warn;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Hazard {
    Breakdown { device: DeviceId },
    Fire { map: MapId, cell: Cell, intensity: f32 },
}

/// [`FailureEffect`] that keeps a journal and a set of broken devices.
///
/// Saved with the rest of the simulation so a load rewinds breakdowns too.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HazardLog {
    journal: Vec<Hazard>,
    broken: BTreeSet<DeviceId>,
}

impl HazardLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn journal(&self) -> &[Hazard] {
        &self.journal
    }

    pub fn is_broken(&self, device: DeviceId) -> bool {
        self.broken.contains(&device)
    }

    /// Returns whether the device was broken.
    pub fn repair(&mut self, device: DeviceId) -> bool {
        self.broken.remove(&device)
    }

    pub fn fires(&self) -> usize {
        self.journal
            .iter()
            .filter(|hazard| matches!(hazard, Hazard::Fire { .. }))
            .count()
    }
}

impl FailureEffect for HazardLog {
    fn apply_breakdown(&mut self, device: DeviceId) {
        warn!(%device, "device broke down");
        self.broken.insert(device);
        self.journal.push(Hazard::Breakdown { device });
    }

    fn ignite_area(&mut self, map: MapId, cell: Cell, intensity: f32) {
        warn!(%map, %cell, intensity, "fire started");
        self.journal.push(Hazard::Fire {
            map,
            cell,
            intensity,
        });
    }
}
