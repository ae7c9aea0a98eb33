//! Repository layer for dynamic runtime data.
//!
//! Repositories hold data that CHANGES during a run: facility state, world
//! placement and battery levels, bundled as a [`Snapshot`] per save slot.
//! Static content (scenarios, configuration) comes from `teleport-content`.

mod error;
mod file;
mod memory;
mod snapshot;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileStateRepository;
pub use memory::InMemoryStateRepo;
pub use snapshot::{LoadPolicy, Snapshot};
pub use traits::StateRepository;
