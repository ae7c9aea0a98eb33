//! Repository contracts for saving and loading mutable runtime state.

use super::error::Result;
use super::snapshot::Snapshot;

/// Repository for snapshot persistence, indexed by save slot.
pub trait StateRepository: Send + Sync {
    fn save(&self, slot: u64, snapshot: &Snapshot) -> Result<()>;

    /// `Ok(None)` when the slot was never written.
    fn load(&self, slot: u64) -> Result<Option<Snapshot>>;

    fn exists(&self, slot: u64) -> bool;

    fn delete(&self, slot: u64) -> Result<()>;

    /// List all occupied slots in ascending order.
    fn list_slots(&self) -> Result<Vec<u64>> {
        Ok(vec![])
    }

    /// Delete all snapshots in a range [start, end]
    fn delete_range(&self, start: u64, end: u64) -> Result<usize> {
        let mut deleted = 0;
        for slot in start..=end {
            if self.exists(slot) {
                self.delete(slot)?;
                deleted += 1;
            }
        }
        Ok(deleted)
    }
}
