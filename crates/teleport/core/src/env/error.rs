//! Host collaborator availability errors.

use crate::error::{ErrorSeverity, TeleportError};

/// A required collaborator was not wired into the [`Env`](super::Env).
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HostError {
    #[error("entity world not available")]
    WorldNotAvailable,
}

impl TeleportError for HostError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            HostError::WorldNotAvailable => "HOST_WORLD_NOT_AVAILABLE",
        }
    }
}
