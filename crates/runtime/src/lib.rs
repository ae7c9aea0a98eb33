//! Host-side orchestration for the teleport simulation.
//!
//! This crate supplies the in-memory host world behind the collaborator traits
//! of `teleport-core`, a tick-driven [`Simulation`] driver, save/load
//! repositories and an async [`Runtime`] that owns the simulation in a worker
//! task. Consumers build a simulation from a scenario, start a runtime and
//! drive it through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`world`] implements the collaborator traits
//! - [`simulation`] owns state and collaborators and advances the clock
//! - [`runtime`] hosts the orchestrator, [`handle`] the client façade
//! - [`repository`] persists snapshots
//! - [`scenario`] turns content into a live simulation
pub mod capabilities;
pub mod error;
pub mod events;
pub mod handle;
pub mod messages;
pub mod operator;
pub mod repository;
pub mod runtime;
pub mod scenario;
pub mod simulation;
pub mod world;

mod worker;

pub use capabilities::CapabilityRegistry;
pub use error::{Result, RuntimeError};
pub use events::{EventBus, SimEvent};
pub use handle::RuntimeHandle;
pub use messages::{Message, MessageLog, Tone};
pub use operator::{IdleOperator, OperatorProvider, ScriptedOperator};
pub use repository::{
    FileStateRepository, InMemoryStateRepo, LoadPolicy, RepositoryError, Snapshot,
    StateRepository,
};
pub use runtime::{Runtime, RuntimeConfig};
pub use scenario::build_simulation;
pub use simulation::{PlatformOption, RecallCandidate, Simulation};
pub use worker::StatusReport;
