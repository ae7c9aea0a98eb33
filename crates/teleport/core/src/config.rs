use crate::state::{ActionKind, PadSize, RecallPolicy};

/// Tunable timings, power figures and policies for the action state machine.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct TeleportConfig {
    /// Ticks a forward teleport charges before it fires.
    pub teleport_ticks: u32,
    /// Ticks a recall charges before it fires.
    pub recall_ticks: u32,
    /// Drain billed while charging when the device has no configured draw.
    pub default_drain: f32,
    /// Charging drain is the idle draw scaled by this factor.
    pub drain_multiplier: f32,
    /// Converts a drain rate into energy per tick for the sufficiency check.
    pub energy_window: f32,
    /// Presentation tick cue fires every this many ticks.
    pub cue_interval: u32,
    /// Search radius for scattered arrival cells.
    pub scatter_radius: u32,
    pub fire_intensity: f32,
    pub default_recall_radius: u32,
    pub large_recall_radius: u32,
    pub recall_policy: RecallPolicy,
    /// Whether operators may abort an action mid-charge.
    pub allow_cancel: bool,
}

impl TeleportConfig {
    pub const DEFAULT_TELEPORT_TICKS: u32 = 360;
    pub const DEFAULT_RECALL_TICKS: u32 = 360;
    pub const DEFAULT_DRAIN: f32 = 20_000.0;
    pub const DEFAULT_DRAIN_MULTIPLIER: f32 = 1_000.0;
    pub const DEFAULT_ENERGY_WINDOW: f32 = 60_000.0;
    pub const DEFAULT_CUE_INTERVAL: u32 = 10;
    pub const DEFAULT_SCATTER_RADIUS: u32 = 5;
    pub const DEFAULT_FIRE_INTENSITY: f32 = 1.0;
    pub const DEFAULT_RECALL_RADIUS: u32 = 1;
    pub const DEFAULT_LARGE_RECALL_RADIUS: u32 = 2;
    /// Largest scatter or recall radius any search honors.
    pub const MAX_RADIUS: u32 = 256;

    pub fn new() -> Self {
        Self {
            teleport_ticks: Self::DEFAULT_TELEPORT_TICKS,
            recall_ticks: Self::DEFAULT_RECALL_TICKS,
            default_drain: Self::DEFAULT_DRAIN,
            drain_multiplier: Self::DEFAULT_DRAIN_MULTIPLIER,
            energy_window: Self::DEFAULT_ENERGY_WINDOW,
            cue_interval: Self::DEFAULT_CUE_INTERVAL,
            scatter_radius: Self::DEFAULT_SCATTER_RADIUS,
            fire_intensity: Self::DEFAULT_FIRE_INTENSITY,
            default_recall_radius: Self::DEFAULT_RECALL_RADIUS,
            large_recall_radius: Self::DEFAULT_LARGE_RECALL_RADIUS,
            recall_policy: RecallPolicy::default(),
            allow_cancel: true,
        }
    }

    pub fn required_ticks(&self, kind: ActionKind) -> u32 {
        match kind {
            ActionKind::Teleport => self.teleport_ticks,
            ActionKind::Recall => self.recall_ticks,
        }
    }

    /// Drain billed per tick while charging a device with the given idle draw.
    pub fn charging_drain(&self, power_draw: Option<f32>) -> f32 {
        power_draw.map_or(self.default_drain, |draw| draw * self.drain_multiplier)
    }

    /// Gather radius around a recall anchor for the given landing pad size.
    pub fn recall_radius(&self, pad: Option<PadSize>) -> u32 {
        match pad {
            Some(PadSize::Large) => self.large_recall_radius,
            Some(PadSize::Small) | None => self.default_recall_radius,
        }
    }

    pub fn with_recall_policy(mut self, policy: RecallPolicy) -> Self {
        self.recall_policy = policy;
        self
    }
}

impl Default for TeleportConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charging_drain_scales_configured_draw() {
        let config = TeleportConfig::new();
        assert_eq!(config.charging_drain(None), 20_000.0);
        assert_eq!(config.charging_drain(Some(2.5)), 2_500.0);
    }

    #[test]
    fn recall_radius_follows_pad_size() {
        let config = TeleportConfig::new();
        assert_eq!(config.recall_radius(Some(PadSize::Large)), 2);
        assert_eq!(config.recall_radius(Some(PadSize::Small)), 1);
        assert_eq!(config.recall_radius(None), 1);
    }
}
