//! Optional host capabilities resolved once at startup.
//!
//! Area-denial shields are not part of every host. The registry is built from
//! the scenario before the first tick; when no shield provider is present the
//! engine sees no [`AreaDefense`] at all and treats every map as undefended.

use teleport_content::ShieldSpec;
use teleport_core::AreaDefense;
use tracing::info;

use crate::world::{Shield, ShieldBoard};

#[derive(Default)]
pub struct CapabilityRegistry {
    shields: Option<ShieldBoard>,
}

impl CapabilityRegistry {
    /// Registry with no optional capability installed.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_shields(board: ShieldBoard) -> Self {
        Self {
            shields: Some(board),
        }
    }

    /// Installs a shield provider only if the scenario places any shield.
    pub fn detect(shields: &[ShieldSpec]) -> Self {
        if shields.is_empty() {
            info!("no area-defense provider detected, shields disabled");
            return Self::none();
        }
        info!(count = shields.len(), "area-defense provider detected");
        Self::with_shields(ShieldBoard::new(
            shields
                .iter()
                .map(|spec| Shield::new(spec.map, spec.hostile, spec.active)),
        ))
    }

    pub fn has_defense(&self) -> bool {
        self.shields.is_some()
    }

    pub fn defense(&mut self) -> Option<&mut dyn AreaDefense> {
        self.shields
            .as_mut()
            .map(|board| board as &mut dyn AreaDefense)
    }

    pub fn shields(&self) -> Option<&ShieldBoard> {
        self.shields.as_ref()
    }

    pub fn shields_mut(&mut self) -> Option<&mut ShieldBoard> {
        self.shields.as_mut()
    }
}
