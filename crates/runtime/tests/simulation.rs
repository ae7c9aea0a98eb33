mod common;

use common::*;
use runtime::world::Hazard;
use runtime::{InMemoryStateRepo, LoadPolicy, RuntimeError, Tone};
use teleport_core::{
    ActionKind, ActionOutcome, BeginError, CancelError, Cell, EntityWorld, Footprint, PadSize,
    TeleportRequest, Tick,
};

fn send_from_pad() -> TeleportRequest {
    TeleportRequest::new(destination()).from_platform(PAD)
}

fn friendly_suppressed(sim: &runtime::Simulation) -> bool {
    sim.capabilities().shields().expect("outpost has shields").shields()[0].is_suppressed()
}

// ============================================================================
// Teleport
// ============================================================================

#[test]
fn teleport_moves_pad_contents_at_tick_360() {
    let mut sim = outpost();
    sim.begin_teleport(CONSOLE, send_from_pad()).unwrap();
    assert_eq!(sim.messages().latest().unwrap().tone, Tone::Neutral);

    assert!(sim.run(359).is_empty());
    assert!(sim.world().location(ADA).is_some_and(|at| at.map == HOME));

    let outcomes = sim.step();
    assert_eq!(sim.clock(), Tick(360));
    match outcomes.as_slice() {
        [ActionOutcome::Completed {
            device,
            kind: ActionKind::Teleport,
            transfer,
            charges_left: None,
        }] => {
            assert_eq!(*device, CONSOLE);
            assert_eq!(transfer.moved_count(), 2);
        }
        other => panic!("unexpected outcomes {other:?}"),
    }

    for entity in [ADA, CRATE] {
        let at = sim.world().location(entity).unwrap();
        assert_eq!(at.map, AWAY);
        assert!((at.cell.x - 20).abs() <= 5 && (at.cell.z - 20).abs() <= 5);
    }
    assert_eq!(
        sim.world().location(BEACON).map(|at| at.cell),
        Some(Cell::new(5, 4))
    );

    let last = sim.messages().latest().unwrap();
    assert_eq!(last.tone, Tone::Positive);
    assert!(last.text.contains("teleported 2 entities"));
    assert!(sim.state().device(CONSOLE).unwrap().is_idle());
    assert!(!sim.cues().is_glowing(CONSOLE));
}

#[test]
fn friendly_shields_are_down_only_while_charging() {
    let mut sim = outpost();
    sim.begin_teleport(CONSOLE, send_from_pad()).unwrap();
    assert!(!friendly_suppressed(&sim));

    sim.step();
    assert!(friendly_suppressed(&sim));
    assert!(sim.cues().is_glowing(CONSOLE));

    sim.run(359);
    assert!(!friendly_suppressed(&sim));
}

#[test]
fn charging_bills_scaled_draw_then_idle() {
    let mut sim = outpost();
    sim.begin_teleport(CONSOLE, send_from_pad()).unwrap();
    sim.step();
    assert_eq!(sim.power().network(NET).unwrap().drain_of(CONSOLE), Some(2_000.0));

    sim.run(359);
    assert_eq!(sim.power().network(NET).unwrap().drain_of(CONSOLE), Some(2.0));
}

// ============================================================================
// Power failure
// ============================================================================

#[test]
fn blackout_breaks_both_devices_and_lights_the_pad() {
    let mut sim = blackout();
    sim.begin_teleport(CONSOLE, send_from_pad()).unwrap();

    let outcomes = sim.run(360);
    let elapsed = match outcomes.as_slice() {
        [ActionOutcome::Failed { device, elapsed, .. }] => {
            assert_eq!(*device, CONSOLE);
            *elapsed
        }
        other => panic!("unexpected outcomes {other:?}"),
    };
    assert!(elapsed > 1 && elapsed < 40, "failed on tick {elapsed}");

    assert_eq!(
        sim.hazards().journal(),
        &[
            Hazard::Breakdown { device: CONSOLE },
            Hazard::Breakdown { device: PAD },
            Hazard::Fire {
                map: HOME,
                cell: Cell::new(4, 4),
                intensity: 1.0,
            },
        ]
    );
    assert_eq!(sim.world().location(ADA).unwrap().map, HOME);
    assert_eq!(sim.power().network(NET).unwrap().drain_of(CONSOLE), Some(2.0));
    assert!(!friendly_suppressed(&sim));
    assert_eq!(sim.messages().latest().unwrap().tone, Tone::Negative);
}

#[test]
fn broken_device_refuses_until_repaired() {
    let mut sim = blackout();
    sim.begin_teleport(CONSOLE, send_from_pad()).unwrap();
    sim.run(360);

    let err = sim.begin_teleport(CONSOLE, send_from_pad()).unwrap_err();
    assert!(matches!(err, RuntimeError::BrokenDown(device) if device == CONSOLE));
    assert!(err.is_rejection());

    assert!(sim.repair(CONSOLE));
    assert!(!sim.repair(CONSOLE));
    sim.begin_teleport(CONSOLE, send_from_pad()).unwrap();
}

// ============================================================================
// Recall
// ============================================================================

#[test]
fn recall_pulls_anchor_and_neighbour_onto_linked_pad() {
    let mut sim = outpost();
    sim.begin_recall(CONSOLE, SCOUT).unwrap();

    let outcomes = sim.run(360);
    match outcomes.as_slice() {
        [ActionOutcome::Completed {
            kind: ActionKind::Recall,
            transfer,
            charges_left,
            ..
        }] => {
            assert_eq!(transfer.moved_count(), 2);
            assert_eq!(*charges_left, Some(2));
        }
        other => panic!("unexpected outcomes {other:?}"),
    }

    let pad = Footprint::new(Cell::new(4, 4), 2, 2);
    for entity in [SCOUT, MEDIC] {
        let at = sim.world().location(entity).unwrap();
        assert_eq!(at.map, HOME);
        assert!(pad.contains(at.cell), "{entity} landed at {}", at.cell);
    }
    assert_eq!(sim.world().location(STRAGGLER).unwrap().map, AWAY);
}

#[test]
fn recall_skips_entities_removed_while_charging() {
    let mut sim = outpost();
    sim.begin_recall(CONSOLE, SCOUT).unwrap();
    sim.run(100);
    assert!(sim.remove_entity(MEDIC).is_some());

    let outcomes = sim.run(260);
    match outcomes.as_slice() {
        [ActionOutcome::Completed {
            kind: ActionKind::Recall,
            transfer,
            charges_left,
            ..
        }] => {
            assert_eq!(transfer.moved_count(), 1);
            assert_eq!(transfer.placements()[0].entity, SCOUT);
            assert_eq!(*charges_left, Some(2));
        }
        other => panic!("unexpected outcomes {other:?}"),
    }
    assert_eq!(sim.world().location(SCOUT).unwrap().map, HOME);
    assert!(sim.world().entity(MEDIC).is_none());
}

#[test]
fn hostile_shield_vetoes_recall() {
    let mut sim = outpost();
    sim.set_shield(AWAY, true, true).unwrap();

    let err = sim.begin_recall(CONSOLE, SCOUT).unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Begin(BeginError::HostileDefenseActive(map)) if map == AWAY
    ));
    assert_eq!(sim.messages().latest().unwrap().tone, Tone::Rejected);
    assert!(sim.state().device(CONSOLE).unwrap().is_idle());

    sim.set_shield(AWAY, true, false).unwrap();
    sim.begin_recall(CONSOLE, SCOUT).unwrap();
}

#[test]
fn anchor_removed_mid_recall_aborts_and_keeps_charge() {
    let mut sim = outpost();
    sim.begin_recall(CONSOLE, SCOUT).unwrap();
    sim.run(100);
    sim.remove_entity(SCOUT);

    let outcomes = sim.run(260);
    assert!(matches!(outcomes.as_slice(), [ActionOutcome::Aborted { .. }]));
    assert_eq!(sim.state().charges().next().unwrap().remaining(), 3);
    assert_eq!(sim.world().location(MEDIC).unwrap().map, AWAY);
}

// ============================================================================
// Cancel and menus
// ============================================================================

#[test]
fn cancel_stops_charge_without_side_effects() {
    let mut sim = outpost();
    sim.begin_teleport(CONSOLE, send_from_pad()).unwrap();
    sim.run(50);

    let outcome = sim.cancel(CONSOLE).unwrap();
    assert_eq!(
        outcome,
        ActionOutcome::Cancelled {
            device: CONSOLE,
            kind: ActionKind::Teleport,
            elapsed: 50,
        }
    );
    assert!(!friendly_suppressed(&sim));
    assert!(sim.hazards().journal().is_empty());
    assert_eq!(sim.world().location(ADA).unwrap().map, HOME);

    let err = sim.cancel(CONSOLE).unwrap_err();
    assert!(matches!(err, RuntimeError::Cancel(CancelError::NotPending(_))));
}

#[test]
fn platform_menu_and_rename() {
    let mut sim = outpost();
    let options = sim.platform_options(CONSOLE).unwrap();
    assert_eq!(options.len(), 1);
    assert_eq!(options[0].id, PAD);
    assert_eq!(options[0].size, PadSize::Small);
    assert_eq!(options[0].label, "Platform 2 (small)");

    sim.rename_device(PAD, "  Gate  ").unwrap();
    assert_eq!(sim.platform_options(PAD).unwrap()[0].label, "Gate");

    sim.rename_device(PAD, "").unwrap();
    assert_eq!(sim.label(PAD), "Platform 2 (small)");

    assert!(sim.platform_options(teleport_core::DeviceId(99)).is_err());
}

#[test]
fn recall_candidates_list_charged_wearers() {
    let sim = outpost();
    let candidates = sim.recall_candidates();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].entity, SCOUT);
    assert_eq!(candidates[0].name, "Scout");
    assert_eq!(candidates[0].remaining, 3);
    assert_eq!(candidates[0].location.map(|at| at.map), Some(AWAY));
}

// ============================================================================
// Save / load
// ============================================================================

#[test]
fn preserved_action_resumes_where_it_was_saved() {
    let repo = InMemoryStateRepo::new();
    let mut sim = outpost();
    sim.begin_teleport(CONSOLE, send_from_pad()).unwrap();
    sim.run(120);
    sim.save(&repo, 1).unwrap();
    sim.run(10);

    sim.load(&repo, 1, LoadPolicy::Preserve).unwrap();
    assert_eq!(sim.clock(), Tick(120));
    let pending = sim.state().device(CONSOLE).unwrap().pending().unwrap();
    assert_eq!(pending.elapsed(), 120);
    assert!(friendly_suppressed(&sim));

    assert!(sim.run(239).is_empty());
    let outcomes = sim.step();
    assert!(outcomes[0].is_completed());
    assert_eq!(sim.clock(), Tick(360));
}

#[test]
fn reset_policy_loads_every_device_idle() {
    let repo = InMemoryStateRepo::new();
    let mut sim = outpost();
    sim.begin_teleport(CONSOLE, send_from_pad()).unwrap();
    sim.run(120);
    sim.save(&repo, 1).unwrap();

    sim.load(&repo, 1, LoadPolicy::ResetToIdle).unwrap();
    assert!(sim.state().devices().all(|device| device.is_idle()));
    assert_eq!(sim.power().network(NET).unwrap().drain_of(CONSOLE), Some(2.0));
    assert!(!friendly_suppressed(&sim));
    assert!(sim.run(400).is_empty());

    let err = sim.load(&repo, 7, LoadPolicy::Preserve).unwrap_err();
    assert!(matches!(err, RuntimeError::NoSnapshot(7)));
}

#[test]
fn loading_over_a_charging_teleport_lifts_its_shield_suppression() {
    let repo = InMemoryStateRepo::new();
    let mut sim = outpost();
    sim.save(&repo, 1).unwrap();

    sim.begin_teleport(CONSOLE, send_from_pad()).unwrap();
    sim.run(10);
    assert!(friendly_suppressed(&sim));

    sim.load(&repo, 1, LoadPolicy::Preserve).unwrap();
    assert!(sim.state().devices().all(|device| device.is_idle()));
    assert!(!friendly_suppressed(&sim));

    sim.run(1000);
    assert!(!friendly_suppressed(&sim));
}

#[test]
fn loading_a_pre_failure_save_rewinds_breakdowns() {
    let repo = InMemoryStateRepo::new();
    let mut sim = blackout();
    sim.save(&repo, 1).unwrap();

    sim.begin_teleport(CONSOLE, send_from_pad()).unwrap();
    sim.run(360);
    assert!(sim.hazards().is_broken(CONSOLE));
    sim.save(&repo, 2).unwrap();

    sim.load(&repo, 1, LoadPolicy::Preserve).unwrap();
    assert!(sim.hazards().journal().is_empty());
    assert!(!sim.hazards().is_broken(PAD));
    sim.begin_teleport(CONSOLE, send_from_pad()).unwrap();

    sim.load(&repo, 2, LoadPolicy::ResetToIdle).unwrap();
    assert!(matches!(
        sim.begin_teleport(CONSOLE, send_from_pad()),
        Err(RuntimeError::BrokenDown(device)) if device == CONSOLE
    ));
}
