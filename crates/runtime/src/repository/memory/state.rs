//! In-memory StateRepository implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::repository::{RepositoryError, Result, Snapshot, StateRepository};

/// In-memory implementation of StateRepository.
pub struct InMemoryStateRepo {
    snapshots: RwLock<HashMap<u64, Snapshot>>,
}

impl InMemoryStateRepo {
    pub fn new() -> Self {
        Self {
            snapshots: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryStateRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl StateRepository for InMemoryStateRepo {
    fn save(&self, slot: u64, snapshot: &Snapshot) -> Result<()> {
        let mut snapshots = self
            .snapshots
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        snapshots.insert(slot, snapshot.clone());
        Ok(())
    }

    fn load(&self, slot: u64) -> Result<Option<Snapshot>> {
        let snapshots = self
            .snapshots
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(snapshots.get(&slot).cloned())
    }

    fn exists(&self, slot: u64) -> bool {
        self.snapshots
            .read()
            .map(|snapshots| snapshots.contains_key(&slot))
            .unwrap_or(false)
    }

    fn delete(&self, slot: u64) -> Result<()> {
        let mut snapshots = self
            .snapshots
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        snapshots.remove(&slot);
        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<u64>> {
        let snapshots = self
            .snapshots
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let mut slots: Vec<u64> = snapshots.keys().copied().collect();
        slots.sort_unstable();
        Ok(slots)
    }
}
