//! Shared error classification for teleport-core.
//!
//! Each module defines its own error enum next to the operations that raise it
//! (`BeginError`, `CancelError`, `TransferError`, ...). They all implement
//! [`TeleportError`] so callers can pick a handling strategy without matching
//! on every variant:
//!
//! - **Recoverable**: the operator may simply retry later (no charge left,
//!   hostile shields up, device busy).
//! - **Validation**: the request itself was malformed and must be changed.
//! - **Internal**: a required reference was missing. Logged, never fatal to the
//!   simulation.
//! - **Fatal**: the host did not supply a required collaborator.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Rejected for now; state unchanged, retry later.
    Recoverable,

    /// Invalid request payload.
    Validation,

    /// Invariant violation such as a vanished anchor or platform.
    Internal,

    /// Host wiring is incomplete.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// True for errors that belong on the diagnostic log channel.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all teleport-core errors.
pub trait TeleportError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for the variant, used in logs and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
