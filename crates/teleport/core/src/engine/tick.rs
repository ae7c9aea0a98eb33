//! Per-tick evaluation of powering devices.
//!
//! Order within one device tick: advance the timer, bill drain, check stored
//! energy, fire cues, then complete. A device that cannot pay for a tick fails
//! on that tick and never completes on it.

use tracing::{debug, error, info, warn};

use super::{AbortReason, ActionOutcome, TeleportEngine};
use crate::action::{TransferReport, gather_footprint, transfer_scattered, transfer_to_cells};
use crate::env::Env;
use crate::state::{
    ActionPayload, ActionState, DeviceId, NetworkId, RecallPayload, TeleportPayload,
};

impl TeleportEngine<'_> {
    /// Advances the clock and every powering device by one tick.
    ///
    /// Devices are stepped in id order. Returns the actions that ended this tick.
    pub fn tick(&mut self, env: &mut Env<'_>) -> Vec<ActionOutcome> {
        self.state.clock = self.state.clock + 1;
        self.state
            .pending_devices()
            .into_iter()
            .filter_map(|device| self.step_device(env, device))
            .collect()
    }

    fn step_device(&mut self, env: &mut Env<'_>, id: DeviceId) -> Option<ActionOutcome> {
        let device = self.state.device_mut(id)?;
        let network = env.resolve_network(device.network);
        let drain = self.config.charging_drain(device.power_draw);
        let action = device.pending_mut()?;
        let elapsed = action.advance();
        action.drain_rate = drain;
        let kind = action.kind;
        let charged = action.is_charged();
        let source_map = match &action.payload {
            ActionPayload::Teleport(payload) => Some(payload.source_map),
            ActionPayload::Recall(_) => None,
        };

        let mut verdict = if charged {
            Verdict::Charged
        } else {
            Verdict::Running
        };
        match network {
            Some(network) => {
                env.bill_drain(network, id, drain);
                let stored = env.stored_energy(network).unwrap_or(0.0);
                if stored < drain / self.config.energy_window {
                    verdict = Verdict::Starved;
                }
            }
            None if elapsed == 1 => {
                debug!(%id, drain, "no resolvable network, charging without sufficiency checks");
            }
            None => {}
        }

        if verdict != Verdict::Starved {
            if self.config.cue_interval > 0 && elapsed % self.config.cue_interval == 0 {
                if let Some(hooks) = env.presentation() {
                    hooks.on_action_tick(id, elapsed);
                }
            }
            if elapsed == 1 {
                if let Some(hooks) = env.presentation() {
                    hooks.on_action_start(id, kind);
                }
                if let Some(map) = source_map {
                    env.suppress_defense(map);
                }
            }
        }

        if verdict == Verdict::Running {
            return None;
        }
        let (action, idle) = self.take_action(id)?;
        Some(match verdict {
            Verdict::Starved => self.fail(env, id, action, idle),
            _ => self.complete(env, id, action, idle),
        })
    }

    fn fail(
        &mut self,
        env: &mut Env<'_>,
        id: DeviceId,
        action: ActionState,
        (network, idle): (Option<NetworkId>, f32),
    ) -> ActionOutcome {
        let elapsed = action.elapsed();
        release(env, id, network, idle);
        warn!(%id, kind = %action.kind, elapsed, "insufficient stored energy, action failed");

        if !env.apply_breakdown(id) {
            warn!(%id, "no failure effect wired in, breakdown skipped");
        }
        if let ActionPayload::Teleport(payload) = &action.payload {
            if payload.platform != id {
                env.apply_breakdown(payload.platform);
            }
            if let Some(pad) = self.state.device(payload.platform) {
                let at = pad.location();
                env.ignite_area(at.map, at.cell, self.config.fire_intensity);
            }
            env.restore_defense(payload.source_map);
        }

        ActionOutcome::Failed {
            device: id,
            kind: action.kind,
            elapsed,
        }
    }

    fn complete(
        &mut self,
        env: &mut Env<'_>,
        id: DeviceId,
        action: ActionState,
        (network, idle): (Option<NetworkId>, f32),
    ) -> ActionOutcome {
        let kind = action.kind;
        let result = match &action.payload {
            ActionPayload::Teleport(payload) => self.fire_teleport(env, payload),
            ActionPayload::Recall(payload) => self.fire_recall(env, payload),
        };

        release(env, id, network, idle);
        if let ActionPayload::Teleport(payload) = &action.payload {
            env.restore_defense(payload.source_map);
        }

        match result {
            Ok((transfer, charges_left)) => {
                if let Some(hooks) = env.presentation() {
                    hooks.on_action_complete(id, kind);
                }
                info!(%id, %kind, moved = transfer.moved_count(), ?charges_left, "action completed");
                ActionOutcome::Completed {
                    device: id,
                    kind,
                    transfer,
                    charges_left,
                }
            }
            Err(reason) => {
                error!(%id, %kind, %reason, "action aborted");
                ActionOutcome::Aborted {
                    device: id,
                    kind,
                    reason,
                }
            }
        }
    }

    /// Moves whatever stands on the source platform right now.
    fn fire_teleport(
        &mut self,
        env: &mut Env<'_>,
        payload: &TeleportPayload,
    ) -> Result<(TransferReport, Option<u32>), AbortReason> {
        let pad = self
            .state
            .device(payload.platform)
            .ok_or(AbortReason::PlatformVanished(payload.platform))?;
        let (map, footprint) = (pad.map, pad.footprint);

        let world = env.world()?;
        let entities = gather_footprint(&*world, map, footprint);
        let report = transfer_scattered(
            world,
            &entities,
            payload.destination,
            self.config.scatter_radius,
        );

        for placement in report.placements() {
            let worn: Vec<_> = self
                .state
                .charges()
                .filter(|source| source.holder == Some(placement.entity))
                .map(|source| source.id)
                .collect();
            for charge in worn {
                if let Some(source) = self.state.charge_mut(charge) {
                    source.remember_teleport(placement.destination);
                }
            }
        }
        Ok((report, None))
    }

    /// Moves the recall set onto the landing platform and spends one charge.
    fn fire_recall(
        &mut self,
        env: &mut Env<'_>,
        payload: &RecallPayload,
    ) -> Result<(TransferReport, Option<u32>), AbortReason> {
        let pad = self
            .state
            .device(payload.platform)
            .ok_or(AbortReason::PlatformVanished(payload.platform))?;
        let (map, cells) = (pad.map, pad.footprint.cells());

        let world = env.world()?;
        if world.location(payload.anchor).is_none() {
            return Err(AbortReason::AnchorLost(payload.anchor));
        }
        let report = transfer_to_cells(world, &payload.entities, map, &cells)?;

        let charges_left = match self.state.charge_mut(payload.charge) {
            Some(source) => {
                source.consume();
                Some(source.remaining())
            }
            None => {
                warn!(charge = %payload.charge, "homing charge vanished before it could be spent");
                None
            }
        };
        Ok((report, charges_left))
    }

    /// Detaches the pending action along with what is needed to idle the device.
    fn take_action(&mut self, id: DeviceId) -> Option<(ActionState, (Option<NetworkId>, f32))> {
        let device = self.state.device_mut(id)?;
        let action = device.clear_pending()?;
        Some((action, (device.network, device.idle_drain())))
    }
}

/// Drops a device back to its idle drain and releases cosmetic handles.
pub(super) fn release(env: &mut Env<'_>, id: DeviceId, network: Option<NetworkId>, idle: f32) {
    if let Some(network) = env.resolve_network(network) {
        env.bill_drain(network, id, idle);
    }
    if let Some(hooks) = env.presentation() {
        hooks.on_action_end(id);
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Verdict {
    Running,
    Starved,
    Charged,
}
