use crate::action::{TransferError, TransferReport};
use crate::env::HostError;
use crate::error::{ErrorSeverity, TeleportError};
use crate::state::{ActionKind, DeviceId, EntityId};

/// How an action ended. Every variant leaves the device Idle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionOutcome {
    /// Fully charged and transferred. `transfer` may be `NothingToMove`.
    Completed {
        device: DeviceId,
        kind: ActionKind,
        transfer: TransferReport,
        /// Charges left on the consumed homing item (recall only).
        charges_left: Option<u32>,
    },

    /// Ran out of stored energy on tick `elapsed`. Breakdown and fire were applied.
    Failed {
        device: DeviceId,
        kind: ActionKind,
        elapsed: u32,
    },

    /// A required reference vanished mid-action. No side effects were applied.
    Aborted {
        device: DeviceId,
        kind: ActionKind,
        reason: AbortReason,
    },

    /// Operator-initiated stop before completion.
    Cancelled {
        device: DeviceId,
        kind: ActionKind,
        elapsed: u32,
    },
}

impl ActionOutcome {
    pub fn device(&self) -> DeviceId {
        match self {
            ActionOutcome::Completed { device, .. }
            | ActionOutcome::Failed { device, .. }
            | ActionOutcome::Aborted { device, .. }
            | ActionOutcome::Cancelled { device, .. } => *device,
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            ActionOutcome::Completed { kind, .. }
            | ActionOutcome::Failed { kind, .. }
            | ActionOutcome::Aborted { kind, .. }
            | ActionOutcome::Cancelled { kind, .. } => *kind,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, ActionOutcome::Completed { .. })
    }
}

/// Invariant violations detected when an action fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbortReason {
    #[error("platform {0} no longer exists")]
    PlatformVanished(DeviceId),

    #[error("recall anchor {0} left the world")]
    AnchorLost(EntityId),

    #[error(transparent)]
    Host(#[from] HostError),

    #[error(transparent)]
    Transfer(#[from] TransferError),
}

impl TeleportError for AbortReason {
    fn severity(&self) -> ErrorSeverity {
        match self {
            AbortReason::Host(err) => err.severity(),
            _ => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AbortReason::PlatformVanished(_) => "ABORT_PLATFORM_VANISHED",
            AbortReason::AnchorLost(_) => "ABORT_ANCHOR_LOST",
            AbortReason::Host(err) => err.error_code(),
            AbortReason::Transfer(err) => err.error_code(),
        }
    }
}
