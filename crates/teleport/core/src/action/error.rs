//! Action trigger and transfer errors.
//!
//! Outcomes of a running action (completion, resource failure, abort) are not
//! errors; see [`crate::engine::ActionOutcome`].

use crate::env::HostError;
use crate::error::{ErrorSeverity, TeleportError};
use crate::state::{ActionKind, DeviceId, EntityId, Location, MapId, NetworkId};

// ============================================================================
// Begin Errors
// ============================================================================

/// Why an action could not be started. State is untouched in every case.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BeginError {
    #[error("device {0} not found")]
    DeviceNotFound(DeviceId),

    /// The device already hosts an action. Second actions are never queued.
    #[error("device {device} is already powering up a {pending}")]
    AlreadyBusy { device: DeviceId, pending: ActionKind },

    #[error("map {0} is not loaded")]
    UnknownMap(MapId),

    #[error("destination {0:?} is outside the map")]
    DestinationOutOfBounds(Location),

    #[error("platform {0} not found")]
    PlatformNotFound(DeviceId),

    #[error("device {0} is not a platform")]
    NotAPlatform(DeviceId),

    #[error("platform {platform} is not on network {network:?}")]
    PlatformOffNetwork {
        platform: DeviceId,
        network: Option<NetworkId>,
    },

    /// A controller was asked to teleport without naming a platform.
    #[error("device {0} has no platform to send from")]
    NoSourcePlatform(DeviceId),

    /// The anchor entity is not placed anywhere in the world.
    #[error("recall anchor {0} is not in the world")]
    AnchorNotPlaced(EntityId),

    #[error("{0} carries no usable homing charge")]
    NoCharge(EntityId),

    #[error("hostile area defenses are active on {0}")]
    HostileDefenseActive(MapId),

    #[error("no platform is linked to device {0}")]
    NoLinkedPlatform(DeviceId),

    #[error(transparent)]
    Host(#[from] HostError),
}

impl TeleportError for BeginError {
    fn severity(&self) -> ErrorSeverity {
        use BeginError::*;
        match self {
            AlreadyBusy { .. } | NoCharge(_) | HostileDefenseActive(_) | NoLinkedPlatform(_) => {
                ErrorSeverity::Recoverable
            }

            UnknownMap(_)
            | DestinationOutOfBounds(_)
            | PlatformNotFound(_)
            | NotAPlatform(_)
            | PlatformOffNetwork { .. }
            | NoSourcePlatform(_) => ErrorSeverity::Validation,

            DeviceNotFound(_) | AnchorNotPlaced(_) => ErrorSeverity::Internal,

            Host(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        use BeginError::*;
        match self {
            DeviceNotFound(_) => "BEGIN_DEVICE_NOT_FOUND",
            AlreadyBusy { .. } => "BEGIN_ALREADY_BUSY",
            UnknownMap(_) => "BEGIN_UNKNOWN_MAP",
            DestinationOutOfBounds(_) => "BEGIN_DESTINATION_OUT_OF_BOUNDS",
            PlatformNotFound(_) => "BEGIN_PLATFORM_NOT_FOUND",
            NotAPlatform(_) => "BEGIN_NOT_A_PLATFORM",
            PlatformOffNetwork { .. } => "BEGIN_PLATFORM_OFF_NETWORK",
            NoSourcePlatform(_) => "BEGIN_NO_SOURCE_PLATFORM",
            AnchorNotPlaced(_) => "BEGIN_ANCHOR_NOT_PLACED",
            NoCharge(_) => "BEGIN_NO_CHARGE",
            HostileDefenseActive(_) => "BEGIN_HOSTILE_DEFENSE_ACTIVE",
            NoLinkedPlatform(_) => "BEGIN_NO_LINKED_PLATFORM",
            Host(err) => err.error_code(),
        }
    }
}

// ============================================================================
// Cancel Errors
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CancelError {
    #[error("device {0} not found")]
    DeviceNotFound(DeviceId),

    #[error("device {0} has no action to cancel")]
    NotPending(DeviceId),

    #[error("cancelling actions is disabled")]
    Disabled,
}

impl TeleportError for CancelError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            CancelError::DeviceNotFound(_) => ErrorSeverity::Internal,
            CancelError::NotPending(_) | CancelError::Disabled => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            CancelError::DeviceNotFound(_) => "CANCEL_DEVICE_NOT_FOUND",
            CancelError::NotPending(_) => "CANCEL_NOT_PENDING",
            CancelError::Disabled => "CANCEL_DISABLED",
        }
    }
}

// ============================================================================
// Transfer Errors
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransferError {
    /// A non-empty batch was handed an empty destination footprint.
    #[error("no destination cells for {pending} entities")]
    NoDestinationCells { pending: usize },
}

impl TeleportError for TransferError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            TransferError::NoDestinationCells { .. } => "TRANSFER_NO_DESTINATION_CELLS",
        }
    }
}
