//! Action state machine.
//!
//! [`TeleportEngine`] is the only writer of pending actions in a
//! [`FacilityState`]. A device goes `Idle → PoweringUp(kind)` through
//! [`begin_teleport`](TeleportEngine::begin_teleport) or
//! [`begin_recall`](TeleportEngine::begin_recall), and each
//! [`tick`](TeleportEngine::tick) advances every powering device by one step
//! until it completes, fails for lack of power, aborts on a vanished reference
//! or is cancelled. Either way it ends Idle again.

mod outcome;
mod tick;

pub use outcome::{AbortReason, ActionOutcome};

use tracing::info;

use crate::action::{BeginError, CancelError, TeleportRequest, gather_around};
use crate::config::TeleportConfig;
use crate::env::Env;
use crate::state::{
    ActionPayload, ActionState, ChargeSourceId, Device, DeviceId, EntityId, FacilityState,
    RecallPayload, TeleportPayload,
};

/// Drives teleport and recall actions over a borrowed facility state.
pub struct TeleportEngine<'s> {
    state: &'s mut FacilityState,
    config: &'s TeleportConfig,
}

impl<'s> TeleportEngine<'s> {
    pub fn new(state: &'s mut FacilityState, config: &'s TeleportConfig) -> Self {
        Self { state, config }
    }

    pub fn state(&self) -> &FacilityState {
        self.state
    }

    pub fn config(&self) -> &TeleportConfig {
        self.config
    }

    /// Starts powering up a forward teleport of the source platform's contents
    /// to `request.destination`.
    ///
    /// The source platform is `request.platform`, or the device itself when it
    /// is a platform. A separate platform must share the device's network.
    pub fn begin_teleport(
        &mut self,
        env: &mut Env<'_>,
        device: DeviceId,
        request: TeleportRequest,
    ) -> Result<(), BeginError> {
        let host = self.idle_device(device)?;

        let destination = request.destination;
        let bounds = env
            .world_ref()?
            .dimensions(destination.map)
            .ok_or(BeginError::UnknownMap(destination.map))?;
        if !bounds.contains(destination.cell) {
            return Err(BeginError::DestinationOutOfBounds(destination));
        }

        let platform = match request.platform {
            Some(id) if id == host.id => host,
            Some(id) => self
                .state
                .device(id)
                .ok_or(BeginError::PlatformNotFound(id))?,
            None if host.is_platform() => host,
            None => return Err(BeginError::NoSourcePlatform(host.id)),
        };
        if !platform.is_platform() {
            return Err(BeginError::NotAPlatform(platform.id));
        }
        if platform.id != host.id && (host.network.is_none() || platform.network != host.network)
        {
            return Err(BeginError::PlatformOffNetwork {
                platform: platform.id,
                network: host.network,
            });
        }

        let payload = ActionPayload::Teleport(TeleportPayload {
            destination,
            platform: platform.id,
            source_map: platform.map,
        });
        self.start(device, payload)
    }

    /// Starts powering up a recall of `anchor` (and everything around it) to
    /// the platform linked to `device`.
    ///
    /// The entity set is gathered now; the homing charge is consumed only on
    /// completion.
    pub fn begin_recall(
        &mut self,
        env: &mut Env<'_>,
        device: DeviceId,
        anchor: EntityId,
    ) -> Result<(), BeginError> {
        let host = self.idle_device(device)?;

        let anchor_at = env
            .world_ref()?
            .location(anchor)
            .ok_or(BeginError::AnchorNotPlaced(anchor))?;
        let charge = self
            .state
            .charge_for(anchor, self.config.recall_policy)
            .ok_or(BeginError::NoCharge(anchor))?;
        if env.hostile_defense_active(anchor_at.map) {
            return Err(BeginError::HostileDefenseActive(anchor_at.map));
        }

        let platform = if host.is_platform() {
            host
        } else {
            host.network
                .and_then(|network| self.state.linked_platform(network))
                .ok_or(BeginError::NoLinkedPlatform(host.id))?
        };
        let radius = self.config.recall_radius(platform.pad_size());
        let entities = gather_around(
            env.world_ref()?,
            anchor_at.map,
            anchor_at.cell,
            radius,
            anchor,
        );

        let payload = ActionPayload::Recall(RecallPayload {
            anchor,
            entities,
            charge,
            platform: platform.id,
        });
        self.start(device, payload)
    }

    /// Stops a powering device without side effects beyond resetting its drain
    /// and lifting area-defense suppression.
    pub fn cancel(
        &mut self,
        env: &mut Env<'_>,
        device: DeviceId,
    ) -> Result<ActionOutcome, CancelError> {
        if !self.config.allow_cancel {
            return Err(CancelError::Disabled);
        }
        let host = self
            .state
            .device_mut(device)
            .ok_or(CancelError::DeviceNotFound(device))?;
        let action = host.clear_pending().ok_or(CancelError::NotPending(device))?;
        let (network, idle) = (host.network, host.idle_drain());

        tick::release(env, device, network, idle);
        match &action.payload {
            ActionPayload::Teleport(payload) if action.elapsed() > 0 => {
                env.restore_defense(payload.source_map);
            }
            _ => {}
        }
        info!(%device, kind = %action.kind, elapsed = action.elapsed(), "action cancelled");

        Ok(ActionOutcome::Cancelled {
            device,
            kind: action.kind,
            elapsed: action.elapsed(),
        })
    }

    /// Remaining charges on a homing item, `None` if it is unknown.
    pub fn charges_left(&self, charge: ChargeSourceId) -> Option<u32> {
        self.state.charge(charge).map(|source| source.remaining())
    }

    fn idle_device(&self, device: DeviceId) -> Result<&Device, BeginError> {
        let host = self
            .state
            .device(device)
            .ok_or(BeginError::DeviceNotFound(device))?;
        match host.pending() {
            Some(pending) => Err(BeginError::AlreadyBusy {
                device,
                pending: pending.kind,
            }),
            None => Ok(host),
        }
    }

    fn start(&mut self, device: DeviceId, payload: ActionPayload) -> Result<(), BeginError> {
        let kind = payload.kind();
        let action = ActionState::new(self.config.required_ticks(kind), payload);
        let required = action.required;
        let host = self
            .state
            .device_mut(device)
            .ok_or(BeginError::DeviceNotFound(device))?;
        if let Err(rejected) = host.start_action(action) {
            let pending = host.pending().map_or(rejected.kind, |pending| pending.kind);
            return Err(BeginError::AlreadyBusy { device, pending });
        }
        info!(%device, %kind, required, "action powering up");
        Ok(())
    }
}
