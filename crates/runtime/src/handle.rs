//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! applying operator commands, stepping the clock and streaming events.

use teleport_content::Command;
use teleport_core::{ActionOutcome, Tick};
use tokio::sync::{broadcast, mpsc, oneshot};

use crate::error::{Result, RuntimeError};
use crate::events::{EventBus, SimEvent};
use crate::worker::{StatusReport, WorkerCommand};

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<WorkerCommand>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<WorkerCommand>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    /// Apply an operator command before the next tick.
    ///
    /// Rejections come back as errors for which
    /// [`RuntimeError::is_rejection`] holds; the simulation is unchanged.
    pub async fn execute(&self, command: Command) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(WorkerCommand::Operator {
                command,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Advance the clock by `ticks`, returning every action that ended.
    pub async fn step(&self, ticks: u64) -> Result<Vec<ActionOutcome>> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(WorkerCommand::Step {
                ticks,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    pub async fn clock(&self) -> Result<Tick> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(WorkerCommand::QueryClock { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Snapshot of facility state, messages and hazards.
    pub async fn status(&self) -> Result<StatusReport> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(WorkerCommand::QueryStatus { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SimEvent> {
        self.event_bus.subscribe()
    }

    pub(crate) async fn shutdown(&self) -> Result<()> {
        self.command_tx
            .send(WorkerCommand::Shutdown)
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;
        Ok(())
    }
}
