use super::action::ActionState;
use super::common::{DeviceId, Footprint, Location, MapId, NetworkId};

/// Platform size class. Large pads recall from a wider radius.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PadSize {
    Small,
    Large,
}

/// What role a device plays on its network.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeviceKind {
    /// Console that hosts actions but has no transfer surface of its own.
    Controller,
    /// Pad whose footprint is the source of teleports and the target of recalls.
    Platform(PadSize),
}

/// A stationary device that can host one teleport or recall action at a time.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Device {
    pub id: DeviceId,
    pub kind: DeviceKind,
    pub map: MapId,
    pub footprint: Footprint,
    /// Power network the device draws from. Shared, never owned.
    pub network: Option<NetworkId>,
    /// Configured idle consumption. `None` means the device has no consumption
    /// property and charging falls back to the default drain.
    pub power_draw: Option<f32>,
    /// Player-chosen display name.
    pub label: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pending: Option<ActionState>,
}

impl Device {
    pub fn new(id: DeviceId, kind: DeviceKind, map: MapId, footprint: Footprint) -> Self {
        Self {
            id,
            kind,
            map,
            footprint,
            network: None,
            power_draw: None,
            label: None,
            pending: None,
        }
    }

    pub fn controller(id: DeviceId, location: Location) -> Self {
        Self::new(
            id,
            DeviceKind::Controller,
            location.map,
            Footprint::single(location.cell),
        )
    }

    pub fn platform(id: DeviceId, size: PadSize, map: MapId, footprint: Footprint) -> Self {
        Self::new(id, DeviceKind::Platform(size), map, footprint)
    }

    pub fn on_network(mut self, network: NetworkId) -> Self {
        self.network = Some(network);
        self
    }

    pub fn with_power_draw(mut self, watts: f32) -> Self {
        self.power_draw = Some(watts);
        self
    }

    pub fn pad_size(&self) -> Option<PadSize> {
        match self.kind {
            DeviceKind::Platform(size) => Some(size),
            DeviceKind::Controller => None,
        }
    }

    pub fn is_platform(&self) -> bool {
        self.pad_size().is_some()
    }

    /// Drain rate restored once an action ends.
    pub fn idle_drain(&self) -> f32 {
        self.power_draw.unwrap_or(0.0)
    }

    pub fn location(&self) -> Location {
        Location::new(self.map, self.footprint.origin)
    }

    /// Name shown in menus: the custom label, or a generated fallback.
    pub fn display_label(&self) -> String {
        match (&self.label, self.kind) {
            (Some(label), _) => label.clone(),
            (None, DeviceKind::Controller) => format!("Controller {}", self.id.0),
            (None, DeviceKind::Platform(size)) => format!("Platform {} ({size})", self.id.0),
        }
    }

    /// Sets the custom label. Surrounding whitespace is dropped and a blank
    /// label restores the generated name.
    pub fn set_label(&mut self, raw: &str) {
        let trimmed = raw.trim();
        self.label = (!trimmed.is_empty()).then(|| trimmed.to_owned());
    }

    pub fn pending(&self) -> Option<&ActionState> {
        self.pending.as_ref()
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_none()
    }

    pub(crate) fn pending_mut(&mut self) -> Option<&mut ActionState> {
        self.pending.as_mut()
    }

    /// Installs a new action. Refuses when one is already pending.
    pub(crate) fn start_action(&mut self, action: ActionState) -> Result<(), ActionState> {
        if self.pending.is_some() {
            return Err(action);
        }
        self.pending = Some(action);
        Ok(())
    }

    /// Removes the pending action. The engine runs teardown around this; calling
    /// it directly skips drain reset and cosmetic cleanup.
    pub fn clear_pending(&mut self) -> Option<ActionState> {
        self.pending.take()
    }
}
