//! Narrow interfaces to the host environment.
//!
//! The state machine never reaches into the host directly. Power networks,
//! entity placement, failure penalties, area shields and cosmetic cues are all
//! consumed through the traits here, bundled per call into an [`Env`]. Only
//! the entity world is mandatory; every other collaborator degrades to a
//! documented fallback when absent.
mod effects;
mod error;
mod power;
mod world;

pub use effects::{AreaDefense, FailureEffect, PresentationHooks};
pub use error::HostError;
pub use power::PowerGrid;
pub use world::{EntityHandle, EntityKind, EntityWorld, MapDimensions};

use crate::state::{Cell, DeviceId, MapId, NetworkId};

/// Mutable borrows of the host collaborators for one engine call.
pub struct Env<'a> {
    world: Option<&'a mut dyn EntityWorld>,
    power: Option<&'a mut dyn PowerGrid>,
    failure: Option<&'a mut dyn FailureEffect>,
    defense: Option<&'a mut dyn AreaDefense>,
    presentation: Option<&'a mut dyn PresentationHooks>,
}

impl<'a> Env<'a> {
    pub fn new(world: &'a mut dyn EntityWorld) -> Self {
        Self {
            world: Some(world),
            ..Self::empty()
        }
    }

    pub fn empty() -> Self {
        Self {
            world: None,
            power: None,
            failure: None,
            defense: None,
            presentation: None,
        }
    }

    pub fn with_power(mut self, power: &'a mut dyn PowerGrid) -> Self {
        self.power = Some(power);
        self
    }

    pub fn with_failure(mut self, failure: &'a mut dyn FailureEffect) -> Self {
        self.failure = Some(failure);
        self
    }

    pub fn with_defense(mut self, defense: &'a mut dyn AreaDefense) -> Self {
        self.defense = Some(defense);
        self
    }

    pub fn with_presentation(mut self, presentation: &'a mut dyn PresentationHooks) -> Self {
        self.presentation = Some(presentation);
        self
    }

    /// Returns the entity world.
    ///
    /// # Errors
    ///
    /// Returns `HostError::WorldNotAvailable` if no world was provided.
    pub fn world(&mut self) -> Result<&mut (dyn EntityWorld + 'a), HostError> {
        self.world.as_deref_mut().ok_or(HostError::WorldNotAvailable)
    }

    /// Shared access to the entity world.
    ///
    /// # Errors
    ///
    /// Returns `HostError::WorldNotAvailable` if no world was provided.
    pub fn world_ref(&self) -> Result<&(dyn EntityWorld + 'a), HostError> {
        self.world.as_deref().ok_or(HostError::WorldNotAvailable)
    }

    /// Keeps `network` only if a power grid is wired in and knows about it.
    pub fn resolve_network(&self, network: Option<NetworkId>) -> Option<NetworkId> {
        let power = self.power.as_deref()?;
        network.filter(|network| power.has_network(*network))
    }

    pub fn stored_energy(&self, network: NetworkId) -> Option<f32> {
        self.power
            .as_deref()
            .map(|power| power.stored_energy(network))
    }

    pub fn bill_drain(&mut self, network: NetworkId, device: DeviceId, rate: f32) {
        if let Some(power) = self.power.as_deref_mut() {
            power.set_drain_rate(network, device, rate);
        }
    }

    pub fn hostile_defense_active(&self, map: MapId) -> bool {
        self.defense
            .as_deref()
            .is_some_and(|defense| defense.has_active_hostile_defense(map))
    }

    pub fn suppress_defense(&mut self, map: MapId) {
        if let Some(defense) = self.defense.as_deref_mut() {
            defense.suppress_friendly(map);
        }
    }

    pub fn restore_defense(&mut self, map: MapId) {
        if let Some(defense) = self.defense.as_deref_mut() {
            defense.restore_friendly(map);
        }
    }

    /// Returns `false` when no failure collaborator is wired in.
    pub fn apply_breakdown(&mut self, device: DeviceId) -> bool {
        match self.failure.as_deref_mut() {
            Some(failure) => {
                failure.apply_breakdown(device);
                true
            }
            None => false,
        }
    }

    pub fn ignite_area(&mut self, map: MapId, cell: Cell, intensity: f32) {
        if let Some(failure) = self.failure.as_deref_mut() {
            failure.ignite_area(map, cell, intensity);
        }
    }

    pub fn presentation(&mut self) -> Option<&mut (dyn PresentationHooks + 'a)> {
        self.presentation.as_deref_mut()
    }
}
