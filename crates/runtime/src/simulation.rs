//! Single-threaded simulation driver.
//!
//! [`Simulation`] owns the facility state and every host collaborator, builds
//! an [`Env`] per engine call and turns rejections and outcomes into operator
//! messages. It is the only place that advances the clock.

use teleport_core::{
    ActionKind, ActionOutcome, ActionPayload, BeginError, ChargeSourceId, Device,
    DeviceId, EntityId, Env, FacilityState, Location, MapId, NetworkId, PadSize, PowerGrid,
    TeleportConfig, TeleportEngine, TeleportError, TeleportRequest, Tick,
};
use tracing::{info, warn};

use crate::capabilities::CapabilityRegistry;
use crate::error::{Result, RuntimeError};
use crate::messages::{Message, MessageLog, Tone};
use crate::repository::{LoadPolicy, Snapshot, StateRepository};
use crate::world::{CueLog, GridWorld, HazardLog, PowerNetworks, WorldEntity};

/// Entry of the destination menu shown for a device.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlatformOption {
    pub id: DeviceId,
    pub label: String,
    pub size: PadSize,
    pub map: MapId,
}

/// Wearer of a homing charge that may be recalled right now.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecallCandidate {
    pub entity: EntityId,
    pub name: String,
    pub charge: ChargeSourceId,
    pub remaining: u32,
    pub location: Option<Location>,
}

pub struct Simulation {
    state: FacilityState,
    config: TeleportConfig,
    world: GridWorld,
    power: PowerNetworks,
    hazards: HazardLog,
    capabilities: CapabilityRegistry,
    cues: CueLog,
    messages: MessageLog,
}

impl Simulation {
    pub fn new(config: TeleportConfig, world: GridWorld, power: PowerNetworks) -> Self {
        Self {
            state: FacilityState::new(),
            config,
            world,
            power,
            hazards: HazardLog::new(),
            capabilities: CapabilityRegistry::none(),
            cues: CueLog::new(),
            messages: MessageLog::default(),
        }
    }

    pub fn with_state(mut self, state: FacilityState) -> Self {
        self.state = state;
        self
    }

    pub fn with_capabilities(mut self, capabilities: CapabilityRegistry) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn with_message_capacity(mut self, capacity: usize) -> Self {
        self.messages = MessageLog::new(capacity);
        self
    }

    // ========================================================================
    // Operator commands
    // ========================================================================

    pub fn begin_teleport(&mut self, device: DeviceId, request: TeleportRequest) -> Result<()> {
        self.ensure_operational(device)?;
        let result = {
            let (mut engine, mut env) = self.parts();
            engine.begin_teleport(&mut env, device, request)
        };
        self.record_begin(device, ActionKind::Teleport, result)
    }

    pub fn begin_recall(&mut self, device: DeviceId, anchor: EntityId) -> Result<()> {
        self.ensure_operational(device)?;
        let result = {
            let (mut engine, mut env) = self.parts();
            engine.begin_recall(&mut env, device, anchor)
        };
        self.record_begin(device, ActionKind::Recall, result)
    }

    pub fn cancel(&mut self, device: DeviceId) -> Result<ActionOutcome> {
        let result = {
            let (mut engine, mut env) = self.parts();
            engine.cancel(&mut env, device)
        };
        let label = self.label(device);
        let tick = self.state.clock;
        match result {
            Ok(outcome) => {
                self.messages
                    .push(Message::from_outcome(tick, &label, &outcome));
                Ok(outcome)
            }
            Err(err) => {
                self.messages
                    .push(Message::rejected(tick, device, &label, &err));
                Err(err.into())
            }
        }
    }

    /// Sets a custom label. Blank input restores the generated name.
    pub fn rename_device(&mut self, device: DeviceId, label: &str) -> Result<()> {
        let target = self
            .state
            .device_mut(device)
            .ok_or(RuntimeError::UnknownDevice(device))?;
        target.set_label(label);
        info!(%device, label = %target.display_label(), "device renamed");
        Ok(())
    }

    pub fn set_stored_energy(&mut self, network: NetworkId, energy: f32) -> Result<()> {
        if !self.power.set_stored(network, energy) {
            return Err(RuntimeError::UnknownNetwork(network));
        }
        info!(%network, energy, "stored energy overridden");
        Ok(())
    }

    pub fn set_shield(&mut self, map: MapId, hostile: bool, active: bool) -> Result<()> {
        let board = self
            .capabilities
            .shields_mut()
            .ok_or(RuntimeError::NoDefenseProvider)?;
        board.set(map, hostile, active);
        Ok(())
    }

    /// Returns whether the device was broken down.
    pub fn repair(&mut self, device: DeviceId) -> bool {
        self.hazards.repair(device)
    }

    /// Takes an entity out of the world entirely.
    pub fn remove_entity(&mut self, entity: EntityId) -> Option<WorldEntity> {
        self.world.remove_entity(entity)
    }

    // ========================================================================
    // Clock
    // ========================================================================

    /// Steps the engine one tick, then lets every battery settle.
    pub fn step(&mut self) -> Vec<ActionOutcome> {
        let outcomes = {
            let (mut engine, mut env) = self.parts();
            engine.tick(&mut env)
        };
        self.power.settle(self.config.energy_window);

        let tick = self.state.clock;
        for outcome in &outcomes {
            let label = self.label(outcome.device());
            self.messages
                .push(Message::from_outcome(tick, &label, outcome));
        }
        outcomes
    }

    pub fn run(&mut self, ticks: u64) -> Vec<ActionOutcome> {
        let mut outcomes = Vec::new();
        for _ in 0..ticks {
            outcomes.extend(self.step());
        }
        outcomes
    }

    // ========================================================================
    // Menus
    // ========================================================================

    /// Platforms `device` may send from: itself when it is a platform, then
    /// every other platform on its network.
    pub fn platform_options(&self, device: DeviceId) -> Result<Vec<PlatformOption>> {
        let host = self
            .state
            .device(device)
            .ok_or(RuntimeError::UnknownDevice(device))?;

        let mut options = Vec::new();
        let mut offer = |pad: &Device| {
            if let Some(size) = pad.pad_size() {
                options.push(PlatformOption {
                    id: pad.id,
                    label: pad.display_label(),
                    size,
                    map: pad.map,
                });
            }
        };
        offer(host);
        if let Some(network) = host.network {
            for pad in self.state.platforms_on(network).filter(|pad| pad.id != host.id) {
                offer(pad);
            }
        }
        Ok(options)
    }

    /// Everyone whose homing charge passes the configured recall policy.
    pub fn recall_candidates(&self) -> Vec<RecallCandidate> {
        self.state
            .recall_candidates(self.config.recall_policy)
            .into_iter()
            .filter_map(|(entity, charge)| {
                let source = self.state.charge(charge)?;
                Some(RecallCandidate {
                    entity,
                    name: self.world.name_of(entity),
                    charge,
                    remaining: source.remaining(),
                    location: self.world.entity(entity).and_then(|e| e.location),
                })
            })
            .collect()
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            facility: self.state.clone(),
            world: self.world.clone(),
            power: self.power.clone(),
            hazards: self.hazards.clone(),
        }
    }

    pub fn save(&mut self, repository: &dyn StateRepository, slot: u64) -> Result<()> {
        repository.save(slot, &self.snapshot())?;
        info!(slot, clock = %self.state.clock, "simulation saved");
        self.messages.push(Message::new(
            self.state.clock,
            None,
            Tone::Neutral,
            format!("saved to slot {slot}"),
        ));
        Ok(())
    }

    pub fn load(
        &mut self,
        repository: &dyn StateRepository,
        slot: u64,
        policy: LoadPolicy,
    ) -> Result<()> {
        let snapshot = repository
            .load(slot)?
            .ok_or(RuntimeError::NoSnapshot(slot))?;
        let dropped = self.restore(snapshot, policy);
        info!(slot, clock = %self.state.clock, ?policy, dropped, "simulation loaded");
        self.messages.push(Message::new(
            self.state.clock,
            None,
            Tone::Neutral,
            format!("loaded slot {slot}"),
        ));
        Ok(())
    }

    /// Replaces the saved parts of the simulation. Returns how many pending
    /// actions were dropped.
    ///
    /// Actions charging in the abandoned run end here, so their shield
    /// suppression is lifted before the snapshot takes over.
    pub fn restore(&mut self, snapshot: Snapshot, policy: LoadPolicy) -> usize {
        for map in charging_teleport_maps(&self.state) {
            if let Some(defense) = self.capabilities.defense() {
                defense.restore_friendly(map);
            }
        }

        let Snapshot {
            facility,
            world,
            power,
            hazards,
        } = snapshot;
        self.state = facility;
        self.world = world;
        self.power = power;
        self.hazards = hazards;
        self.cues.clear();

        match policy {
            LoadPolicy::Preserve => {
                for map in charging_teleport_maps(&self.state) {
                    if let Some(defense) = self.capabilities.defense() {
                        defense.suppress_friendly(map);
                    }
                }
                0
            }
            LoadPolicy::ResetToIdle => {
                let mut dropped = 0;
                for id in self.state.pending_devices() {
                    let Some(device) = self.state.device_mut(id) else {
                        continue;
                    };
                    if device.clear_pending().is_none() {
                        continue;
                    }
                    dropped += 1;
                    if let Some(network) = device.network {
                        self.power.set_drain_rate(network, id, device.idle_drain());
                    }
                }
                dropped
            }
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn clock(&self) -> Tick {
        self.state.clock
    }

    pub fn state(&self) -> &FacilityState {
        &self.state
    }

    pub fn config(&self) -> &TeleportConfig {
        &self.config
    }

    pub fn world(&self) -> &GridWorld {
        &self.world
    }

    pub fn power(&self) -> &PowerNetworks {
        &self.power
    }

    pub fn hazards(&self) -> &HazardLog {
        &self.hazards
    }

    pub fn capabilities(&self) -> &CapabilityRegistry {
        &self.capabilities
    }

    pub fn cues(&self) -> &CueLog {
        &self.cues
    }

    pub fn messages(&self) -> &MessageLog {
        &self.messages
    }

    /// Menu label of a device, or its id when unknown.
    pub fn label(&self, device: DeviceId) -> String {
        self.state
            .device(device)
            .map_or_else(|| device.to_string(), |d| d.display_label())
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn parts(&mut self) -> (TeleportEngine<'_>, Env<'_>) {
        let Self {
            state,
            config,
            world,
            power,
            hazards,
            capabilities,
            cues,
            ..
        } = self;
        let mut env = Env::new(world)
            .with_power(power)
            .with_failure(hazards)
            .with_presentation(cues);
        if let Some(defense) = capabilities.defense() {
            env = env.with_defense(defense);
        }
        (TeleportEngine::new(state, config), env)
    }

    fn ensure_operational(&mut self, device: DeviceId) -> Result<()> {
        if !self.hazards.is_broken(device) {
            return Ok(());
        }
        let label = self.label(device);
        self.messages.push(Message::new(
            self.state.clock,
            Some(device),
            Tone::Rejected,
            format!("{label}: broken down, repair it first"),
        ));
        Err(RuntimeError::BrokenDown(device))
    }

    fn record_begin(
        &mut self,
        device: DeviceId,
        kind: ActionKind,
        result: std::result::Result<(), BeginError>,
    ) -> Result<()> {
        let label = self.label(device);
        let tick = self.state.clock;
        match result {
            Ok(()) => {
                self.messages
                    .push(Message::started(tick, device, &label, kind));
                Ok(())
            }
            Err(err) => {
                warn!(%device, %kind, code = err.error_code(), %err, "begin rejected");
                self.messages
                    .push(Message::rejected(tick, device, &label, &err));
                Err(err.into())
            }
        }
    }
}

/// Source maps of teleports that have started charging, whose friendly
/// shields are therefore suppressed.
fn charging_teleport_maps(state: &FacilityState) -> Vec<MapId> {
    state
        .pending_devices()
        .into_iter()
        .filter_map(|id| {
            let action = state.device(id)?.pending()?;
            match &action.payload {
                ActionPayload::Teleport(payload) if action.elapsed() > 0 => {
                    Some(payload.source_map)
                }
                _ => None,
            }
        })
        .collect()
}
