//! Unified error types surfaced by the runtime API.
//!
//! Wraps engine rejections, repository failures and worker coordination
//! failures so clients can bubble them up with consistent context.

use teleport_core::{BeginError, CancelError, DeviceId, NetworkId, StateError};
use thiserror::Error;
use tokio::sync::oneshot;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Begin(#[from] BeginError),

    #[error(transparent)]
    Cancel(#[from] CancelError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("{0} is broken down and must be repaired first")]
    BrokenDown(DeviceId),

    #[error("{0} not found")]
    UnknownDevice(DeviceId),

    #[error("{0} not found")]
    UnknownNetwork(NetworkId),

    #[error("no snapshot saved in slot {0}")]
    NoSnapshot(u64),

    #[error("no area-defense provider is installed")]
    NoDefenseProvider,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),
}

impl RuntimeError {
    /// Operator command refused; the simulation is unchanged and keeps running.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            RuntimeError::Begin(_)
                | RuntimeError::Cancel(_)
                | RuntimeError::BrokenDown(_)
                | RuntimeError::UnknownDevice(_)
                | RuntimeError::UnknownNetwork(_)
                | RuntimeError::NoSnapshot(_)
                | RuntimeError::NoDefenseProvider
        )
    }
}
