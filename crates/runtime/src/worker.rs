//! Simulation worker that owns the authoritative [`Simulation`].
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), applies
//! them between ticks and publishes events to the [`EventBus`].

use teleport_content::Command;
use teleport_core::{ActionKind, ActionOutcome, FacilityState, Location, TeleportRequest, Tick};
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::error::Result;
use crate::events::{EventBus, SimEvent};
use crate::messages::Message;
use crate::repository::{LoadPolicy, StateRepository};
use crate::simulation::{RecallCandidate, Simulation};
use crate::world::Hazard;

/// Read-only view of the simulation returned by status queries.
#[derive(Clone, Debug)]
pub struct StatusReport {
    pub clock: Tick,
    pub facility: FacilityState,
    pub messages: Vec<Message>,
    pub hazards: Vec<Hazard>,
    pub recall_candidates: Vec<RecallCandidate>,
}

pub(crate) enum WorkerCommand {
    /// Apply an operator command before the next tick.
    Operator {
        command: Command,
        reply: oneshot::Sender<Result<()>>,
    },
    Step {
        ticks: u64,
        reply: oneshot::Sender<Vec<ActionOutcome>>,
    },
    QueryClock {
        reply: oneshot::Sender<Tick>,
    },
    QueryStatus {
        reply: oneshot::Sender<StatusReport>,
    },
    Shutdown,
}

pub(crate) struct SimulationWorker {
    sim: Simulation,
    repository: Box<dyn StateRepository>,
    save_slot: u64,
    load_policy: LoadPolicy,
    command_rx: mpsc::Receiver<WorkerCommand>,
    event_bus: EventBus,
}

impl SimulationWorker {
    pub(crate) fn new(
        sim: Simulation,
        repository: Box<dyn StateRepository>,
        save_slot: u64,
        load_policy: LoadPolicy,
        command_rx: mpsc::Receiver<WorkerCommand>,
        event_bus: EventBus,
    ) -> Self {
        tracing::info!(
            "SimulationWorker initialized at tick {} with {} devices",
            sim.clock(),
            sim.state().devices().count()
        );
        Self {
            sim,
            repository,
            save_slot,
            load_policy,
            command_rx,
            event_bus,
        }
    }

    /// Main worker loop. Ends on `Shutdown` or when every handle is dropped.
    pub(crate) async fn run(mut self) {
        while let Some(command) = self.command_rx.recv().await {
            if !self.handle_command(command) {
                break;
            }
        }
        debug!("SimulationWorker stopped at tick {}", self.sim.clock());
    }

    fn handle_command(&mut self, command: WorkerCommand) -> bool {
        match command {
            WorkerCommand::Operator { command, reply } => {
                let result = self.apply(command);
                if let Err(err) = &result
                    && err.is_rejection()
                {
                    self.event_bus.publish(SimEvent::CommandRejected {
                        tick: self.sim.clock(),
                        reason: err.to_string(),
                    });
                }
                if reply.send(result).is_err() {
                    debug!("Operator reply channel closed (caller dropped)");
                }
            }
            WorkerCommand::Step { ticks, reply } => {
                let outcomes = self.step(ticks);
                if reply.send(outcomes).is_err() {
                    debug!("Step reply channel closed (caller dropped)");
                }
            }
            WorkerCommand::QueryClock { reply } => {
                if reply.send(self.sim.clock()).is_err() {
                    debug!("QueryClock reply channel closed (caller dropped)");
                }
            }
            WorkerCommand::QueryStatus { reply } => {
                if reply.send(self.status()).is_err() {
                    debug!("QueryStatus reply channel closed (caller dropped)");
                }
            }
            WorkerCommand::Shutdown => return false,
        }
        true
    }

    fn apply(&mut self, command: Command) -> Result<()> {
        let tick = self.sim.clock();
        match command {
            Command::Teleport {
                device,
                map,
                cell,
                platform,
            } => {
                let mut request = TeleportRequest::new(Location::new(map, cell));
                if let Some(platform) = platform {
                    request = request.from_platform(platform);
                }
                self.sim.begin_teleport(device, request)?;
                self.event_bus.publish(SimEvent::ActionStarted {
                    tick,
                    device,
                    kind: ActionKind::Teleport,
                });
            }
            Command::Recall { device, anchor } => {
                self.sim.begin_recall(device, anchor)?;
                self.event_bus.publish(SimEvent::ActionStarted {
                    tick,
                    device,
                    kind: ActionKind::Recall,
                });
            }
            Command::Cancel { device } => {
                let outcome = self.sim.cancel(device)?;
                self.event_bus
                    .publish(SimEvent::ActionEnded { tick, outcome });
            }
            Command::Rename { device, label } => self.sim.rename_device(device, &label)?,
            Command::SetStoredEnergy { network, energy } => {
                self.sim.set_stored_energy(network, energy)?
            }
            Command::SetShield {
                map,
                hostile,
                active,
            } => self.sim.set_shield(map, hostile, active)?,
            Command::Save => {
                self.sim.save(self.repository.as_ref(), self.save_slot)?;
                self.event_bus.publish(SimEvent::Saved {
                    tick,
                    slot: self.save_slot,
                });
            }
            Command::Load => {
                self.sim
                    .load(self.repository.as_ref(), self.save_slot, self.load_policy)?;
                self.event_bus.publish(SimEvent::Loaded {
                    tick: self.sim.clock(),
                    slot: self.save_slot,
                    policy: self.load_policy,
                });
            }
        }
        Ok(())
    }

    fn step(&mut self, ticks: u64) -> Vec<ActionOutcome> {
        let mut outcomes = Vec::new();
        for _ in 0..ticks {
            let ended = self.sim.step();
            let tick = self.sim.clock();
            for outcome in &ended {
                self.event_bus.publish(SimEvent::ActionEnded {
                    tick,
                    outcome: outcome.clone(),
                });
            }
            outcomes.extend(ended);
        }
        outcomes
    }

    fn status(&self) -> StatusReport {
        StatusReport {
            clock: self.sim.clock(),
            facility: self.sim.state().clone(),
            messages: self.sim.messages().to_vec(),
            hazards: self.sim.hazards().journal().to_vec(),
            recall_candidates: self.sim.recall_candidates(),
        }
    }
}
