//! Data-driven scenario definitions and loaders.
//!
//! This crate houses static teleport content and provides loaders for RON/TOML data files:
//! - Engine configuration (TOML)
//! - Scenarios: maps, power networks, devices, entities, homing items and an
//!   operator script (RON)
//!
//! Content is consumed by the runtime and never appears in facility state.

pub mod scenario;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use scenario::{
    Command, DeviceSpec, DeviceSpecKind, EntitySpec, HomerSpec, MapSpec, NetworkSpec, Scenario,
    ScriptStep, ShieldSpec,
};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LoadResult, ScenarioLoader};
