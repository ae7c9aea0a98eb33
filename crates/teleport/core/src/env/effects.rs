use crate::state::{ActionKind, Cell, DeviceId, MapId};

/// In-world penalties applied when charging runs out of power.
pub trait FailureEffect {
    fn apply_breakdown(&mut self, device: DeviceId);

    fn ignite_area(&mut self, map: MapId, cell: Cell, intensity: f32);
}

/// Optional area-denial shield capability.
///
/// Hosts without a shield system simply leave it out of the [`Env`](super::Env);
/// the engine then treats every map as undefended.
pub trait AreaDefense {
    /// Shields not owned by the operator that are currently switched on.
    fn has_active_hostile_defense(&self, map: MapId) -> bool;

    /// Switches the operator's own shields off.
    fn suppress_friendly(&mut self, map: MapId);

    /// Switches the operator's own shields back on.
    fn restore_friendly(&mut self, map: MapId);
}

/// Sound and visual cues. Purely cosmetic; nothing here feeds back into outcomes.
pub trait PresentationHooks {
    fn on_action_start(&mut self, _device: DeviceId, _kind: ActionKind) {}

    /// Called every configured cue interval while charging.
    fn on_action_tick(&mut self, _device: DeviceId, _elapsed: u32) {}

    fn on_action_complete(&mut self, _device: DeviceId, _kind: ActionKind) {}

    /// Any termination: release glow effects and similar handles.
    fn on_action_end(&mut self, _device: DeviceId) {}
}
