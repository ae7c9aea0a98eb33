//! Action triggers, entity selection and relocation.
//!
//! # Module Structure
//!
//! - `error`: trigger and transfer errors (`BeginError`, `CancelError`, `TransferError`)
//! - `locator`: radial and footprint entity gathering
//! - `transfer`: cyclic and scattered batch relocation
//!
//! The timer and drain logic that ties these together lives in
//! [`crate::engine`].
pub mod error;
pub mod locator;
pub mod transfer;

pub use error::{BeginError, CancelError, TransferError};
pub use locator::{gather_around, gather_footprint, radial_cells};
pub use transfer::{Placement, TransferReport, transfer_scattered, transfer_to_cells};

use crate::state::{DeviceId, Location};

/// Operator request for a forward teleport.
///
/// The trigger path resolves everything up front; the engine performs no
/// global search of its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TeleportRequest {
    pub destination: Location,
    /// Platform to send from. Defaults to the device itself when it is a platform.
    pub platform: Option<DeviceId>,
}

impl TeleportRequest {
    pub fn new(destination: Location) -> Self {
        Self {
            destination,
            platform: None,
        }
    }

    pub fn from_platform(mut self, platform: DeviceId) -> Self {
        self.platform = Some(platform);
        self
    }
}
