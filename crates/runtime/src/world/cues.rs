use std::collections::BTreeSet;

use teleport_core::{ActionKind, DeviceId, PresentationHooks};
use tracing::{debug, trace};

/// Tracks which devices are glowing and traces sound cues.
#[derive(Clone, Debug, Default)]
pub struct CueLog {
    glowing: BTreeSet<DeviceId>,
    pulses: u64,
}

impl CueLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_glowing(&self, device: DeviceId) -> bool {
        self.glowing.contains(&device)
    }

    /// Charging pulses played so far.
    pub fn pulses(&self) -> u64 {
        self.pulses
    }

    pub fn clear(&mut self) {
        self.glowing.clear();
    }
}

impl PresentationHooks for CueLog {
    fn on_action_start(&mut self, device: DeviceId, kind: ActionKind) {
        debug!(%device, %kind, "charge hum starts");
        self.glowing.insert(device);
    }

    fn on_action_tick(&mut self, device: DeviceId, elapsed: u32) {
        trace!(%device, elapsed, "charge pulse");
        self.pulses += 1;
    }

    fn on_action_complete(&mut self, device: DeviceId, kind: ActionKind) {
        debug!(%device, %kind, "discharge flash");
    }

    fn on_action_end(&mut self, device: DeviceId) {
        self.glowing.remove(&device);
    }
}
