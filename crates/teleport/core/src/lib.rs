//! Deterministic teleport and recall action logic.
//!
//! `teleport-core` owns the device/charge data model, the narrow collaborator
//! traits a host implements ([`env`]), entity selection and relocation
//! ([`action`]) and the tick-driven state machine ([`engine`]). It performs no
//! I/O; every pending-action mutation flows through [`engine::TeleportEngine`].
pub mod action;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;

pub use action::{
    BeginError, CancelError, Placement, TeleportRequest, TransferError, TransferReport,
};
pub use config::TeleportConfig;
pub use engine::{AbortReason, ActionOutcome, TeleportEngine};
pub use env::{
    AreaDefense, EntityHandle, EntityKind, EntityWorld, Env, FailureEffect, HostError,
    MapDimensions, PowerGrid, PresentationHooks,
};
pub use error::{ErrorSeverity, TeleportError};
pub use state::{
    ActionKind, ActionPayload, ActionState, Cell, ChargeSource, ChargeSourceId, Device,
    DeviceId, DeviceKind, EntityId, EntitySet, FacilityState, Footprint, Location, MapId,
    NetworkId, PadSize, RecallPayload, RecallPolicy, StateError, TeleportPayload, Tick,
};
