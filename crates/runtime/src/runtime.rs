//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker, wires up command/event channels
//! and drives the clock from an [`OperatorProvider`].

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::warn;

use teleport_core::ActionOutcome;

use crate::error::{Result, RuntimeError};
use crate::events::{EventBus, SimEvent};
use crate::handle::RuntimeHandle;
use crate::operator::OperatorProvider;
use crate::repository::{LoadPolicy, StateRepository};
use crate::simulation::Simulation;
use crate::worker::SimulationWorker;

/// Runtime configuration shared across the orchestrator and worker.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Slot used by the `Save` and `Load` operator commands.
    pub save_slot: u64,
    pub load_policy: LoadPolicy,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            event_buffer_size: 100,
            command_buffer_size: 32,
            save_slot: 0,
            load_policy: LoadPolicy::default(),
        }
    }
}

/// Main runtime that orchestrates the simulation.
///
/// Design: Runtime owns the worker task. [`RuntimeHandle`] provides a
/// cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    worker: JoinHandle<()>,
}

impl Runtime {
    /// Spawns the simulation worker on the current tokio runtime.
    pub fn start(
        sim: Simulation,
        repository: Box<dyn StateRepository>,
        config: RuntimeConfig,
    ) -> Self {
        let (command_tx, command_rx) = tokio::sync::mpsc::channel(config.command_buffer_size);
        let event_bus = EventBus::with_capacity(config.event_buffer_size);

        let worker = SimulationWorker::new(
            sim,
            repository,
            config.save_slot,
            config.load_policy,
            command_rx,
            event_bus.clone(),
        );
        let worker = tokio::spawn(worker.run());

        Self {
            handle: RuntimeHandle::new(command_tx, event_bus),
            worker,
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SimEvent> {
        self.handle.subscribe()
    }

    /// Runs `ticks` ticks, applying the operator's commands before each one.
    ///
    /// Rejected commands are logged and skipped; any other error stops the run.
    pub async fn drive(
        &self,
        operator: &dyn OperatorProvider,
        ticks: u64,
    ) -> Result<Vec<ActionOutcome>> {
        let mut outcomes = Vec::new();
        for _ in 0..ticks {
            let clock = self.handle.clock().await?;
            for command in operator.commands_at(clock).await? {
                match self.handle.execute(command).await {
                    Ok(()) => {}
                    Err(err) if err.is_rejection() => {
                        warn!(%clock, %err, "operator command rejected");
                    }
                    Err(err) => return Err(err),
                }
            }
            outcomes.extend(self.handle.step(1).await?);
        }
        Ok(outcomes)
    }

    /// Shutdown the runtime gracefully
    pub async fn shutdown(self) -> Result<()> {
        self.handle.shutdown().await?;
        self.worker.await.map_err(RuntimeError::WorkerJoin)
    }
}
