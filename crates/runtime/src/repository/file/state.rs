//! File-based StateRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::repository::{RepositoryError, Result, Snapshot, StateRepository};

const DIGEST_LEN: usize = 32;

/// File-based implementation of StateRepository.
///
/// Stores snapshots as individual files indexed by slot.
///
/// # File Format
///
/// `snapshot_{slot}.bin` holds a SHA-256 digest of the payload followed by
/// the bincode-encoded [`Snapshot`]. A digest mismatch on load is reported as
/// [`RepositoryError::CorruptedData`].
pub struct FileStateRepository {
    base_dir: PathBuf,
}

impl FileStateRepository {
    /// Create a new file-based state repository.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn snapshot_path(&self, slot: u64) -> PathBuf {
        self.base_dir.join(format!("snapshot_{}.bin", slot))
    }
}

impl StateRepository for FileStateRepository {
    fn save(&self, slot: u64, snapshot: &Snapshot) -> Result<()> {
        let path = self.snapshot_path(slot);
        let temp_path = path.with_extension("bin.tmp");

        let payload = bincode::serialize(snapshot)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        let digest = Sha256::digest(&payload);

        let mut bytes = Vec::with_capacity(DIGEST_LEN + payload.len());
        bytes.extend_from_slice(&digest);
        bytes.extend_from_slice(&payload);

        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!(
            "Saved snapshot[{}] to {} (sha256 {})",
            slot,
            path.display(),
            hex::encode(&digest[..8])
        );

        Ok(())
    }

    fn load(&self, slot: u64) -> Result<Option<Snapshot>> {
        let path = self.snapshot_path(slot);

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        if bytes.len() < DIGEST_LEN {
            return Err(RepositoryError::CorruptedData(format!(
                "snapshot[{}] is truncated ({} bytes)",
                slot,
                bytes.len()
            )));
        }
        let (digest, payload) = bytes.split_at(DIGEST_LEN);
        let actual = Sha256::digest(payload);
        if actual.as_slice() != digest {
            return Err(RepositoryError::CorruptedData(format!(
                "snapshot[{}] digest mismatch: stored {}, computed {}",
                slot,
                hex::encode(digest),
                hex::encode(actual)
            )));
        }

        let snapshot: Snapshot = bincode::deserialize(payload)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        tracing::debug!("Loaded snapshot[{}] from {}", slot, path.display());

        Ok(Some(snapshot))
    }

    fn exists(&self, slot: u64) -> bool {
        self.snapshot_path(slot).exists()
    }

    fn delete(&self, slot: u64) -> Result<()> {
        let path = self.snapshot_path(slot);

        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!("Deleted snapshot[{}]", slot);
        }

        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<u64>> {
        let mut slots = Vec::new();

        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();

            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(slot_str) = filename
                    .strip_prefix("snapshot_")
                    .and_then(|s| s.strip_suffix(".bin"))
                && let Ok(slot) = slot_str.parse::<u64>()
            {
                slots.push(slot);
            }
        }

        slots.sort_unstable();
        Ok(slots)
    }
}
