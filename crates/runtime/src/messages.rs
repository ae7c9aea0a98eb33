//! Operator-facing message log.
//!
//! Rejections and outcomes are turned into short lines keyed by device and
//! tone. The log is a bounded ring: the oldest line goes when it is full.

use std::collections::VecDeque;
use std::fmt;

use teleport_core::{
    ActionKind, ActionOutcome, DeviceId, ErrorSeverity, TeleportError, Tick, TransferReport,
};

/// Default number of retained messages.
pub const DEFAULT_CAPACITY: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Neutral,
    Positive,
    Negative,
    Rejected,
}

impl Tone {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Tone::Neutral => "neutral",
            Tone::Positive => "positive",
            Tone::Negative => "negative",
            Tone::Rejected => "rejected",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub tick: Tick,
    pub device: Option<DeviceId>,
    pub tone: Tone,
    pub text: String,
}

impl Message {
    pub fn new(tick: Tick, device: Option<DeviceId>, tone: Tone, text: impl Into<String>) -> Self {
        Self {
            tick,
            device,
            tone,
            text: text.into(),
        }
    }

    pub fn started(tick: Tick, device: DeviceId, label: &str, kind: ActionKind) -> Self {
        Self::new(
            tick,
            Some(device),
            Tone::Neutral,
            format!("{label}: powering up for {kind}"),
        )
    }

    /// A refused command. Internal errors keep their code so they can be traced.
    pub fn rejected<E: TeleportError>(tick: Tick, device: DeviceId, label: &str, err: &E) -> Self {
        let text = match err.severity() {
            ErrorSeverity::Recoverable | ErrorSeverity::Validation => format!("{label}: {err}"),
            ErrorSeverity::Internal | ErrorSeverity::Fatal => {
                format!("{label}: {err} [{}]", err.error_code())
            }
        };
        Self::new(tick, Some(device), Tone::Rejected, text)
    }

    pub fn from_outcome(tick: Tick, label: &str, outcome: &ActionOutcome) -> Self {
        let device = Some(outcome.device());
        match outcome {
            ActionOutcome::Completed {
                kind,
                transfer: TransferReport::NothingToMove,
                ..
            } => Self::new(
                tick,
                device,
                Tone::Neutral,
                format!("{label}: {kind} fired with nothing to move"),
            ),
            ActionOutcome::Completed {
                kind: ActionKind::Teleport,
                transfer,
                ..
            } => Self::new(
                tick,
                device,
                Tone::Positive,
                format!("{label}: teleported {} entities", transfer.moved_count()),
            ),
            ActionOutcome::Completed {
                kind: ActionKind::Recall,
                transfer,
                charges_left,
                ..
            } => {
                let charges = charges_left.map_or_else(|| "?".to_owned(), |n| n.to_string());
                Self::new(
                    tick,
                    device,
                    Tone::Positive,
                    format!(
                        "{label}: recalled {} entities, {charges} homing charges left",
                        transfer.moved_count()
                    ),
                )
            }
            ActionOutcome::Failed { kind, elapsed, .. } => Self::new(
                tick,
                device,
                Tone::Negative,
                format!("{label}: {kind} lost power after {elapsed} ticks and broke down"),
            ),
            ActionOutcome::Aborted { kind, reason, .. } => Self::new(
                tick,
                device,
                Tone::Negative,
                format!("{label}: {kind} aborted, {reason}"),
            ),
            ActionOutcome::Cancelled { kind, elapsed, .. } => Self::new(
                tick,
                device,
                Tone::Neutral,
                format!("{label}: {kind} cancelled after {elapsed} ticks"),
            ),
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:>6}] {:<8} {}", self.tick.0, self.tone.as_str(), self.text)
    }
}

#[derive(Clone, Debug)]
pub struct MessageLog {
    capacity: usize,
    messages: VecDeque<Message>,
}

impl MessageLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            messages: VecDeque::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, message: Message) {
        if self.messages.len() == self.capacity {
            self.messages.pop_front();
        }
        self.messages.push_back(message);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    pub fn latest(&self) -> Option<&Message> {
        self.messages.back()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn to_vec(&self) -> Vec<Message> {
        self.messages.iter().cloned().collect()
    }
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
