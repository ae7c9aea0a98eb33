//! Broadcast of simulation events to any number of subscribers.

use teleport_core::{ActionKind, ActionOutcome, DeviceId, Tick};
use tokio::sync::broadcast;

use crate::repository::LoadPolicy;

#[derive(Clone, Debug)]
pub enum SimEvent {
    ActionStarted {
        tick: Tick,
        device: DeviceId,
        kind: ActionKind,
    },
    ActionEnded {
        tick: Tick,
        outcome: ActionOutcome,
    },
    CommandRejected {
        tick: Tick,
        reason: String,
    },
    Saved {
        tick: Tick,
        slot: u64,
    },
    Loaded {
        tick: Tick,
        slot: u64,
        policy: LoadPolicy,
    },
}

/// Cloneable publisher. Events are best-effort: with no subscriber they are dropped.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<SimEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tx: broadcast::channel(capacity.max(1)).0,
        }
    }

    pub fn publish(&self, event: SimEvent) {
        if self.tx.send(event).is_err() {
            tracing::trace!("No subscribers for simulation events");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SimEvent> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
