//! Facility state errors.
//!
//! Raised while registering devices and charge sources, never during ticks.

use crate::error::{ErrorSeverity, TeleportError};
use crate::state::{ChargeSourceId, DeviceId};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateError {
    /// A device with this id is already registered.
    #[error("device {device} is already registered")]
    DuplicateDevice { device: DeviceId },

    /// A charge source with this id is already registered.
    #[error("charge source {charge} is already registered")]
    DuplicateChargeSource { charge: ChargeSourceId },
}

impl TeleportError for StateError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        use StateError::*;
        match self {
            DuplicateDevice { .. } => "STATE_DUPLICATE_DEVICE",
            DuplicateChargeSource { .. } => "STATE_DUPLICATE_CHARGE_SOURCE",
        }
    }
}
