mod common;

use runtime::{
    IdleOperator, InMemoryStateRepo, Runtime, RuntimeConfig, ScriptedOperator, SimEvent,
    StateRepository,
};
use teleport_core::{ActionKind, Tick};

#[tokio::test]
async fn scripted_run_publishes_events_and_saves() {
    let scenario = common::scenario(common::OUTPOST);
    let sim = runtime::build_simulation(&scenario, Default::default()).unwrap();
    let runtime = Runtime::start(sim, Box::new(InMemoryStateRepo::new()), RuntimeConfig::default());
    let mut events = runtime.subscribe();

    let operator = ScriptedOperator::from_scenario(&scenario);
    let outcomes = runtime.drive(&operator, 400).await.unwrap();
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].kind(), ActionKind::Teleport);
    assert!(outcomes[0].is_completed());

    let mut seen = Vec::new();
    while let Ok(event) = events.try_recv() {
        seen.push(event);
    }
    assert!(matches!(
        seen.first(),
        Some(SimEvent::ActionStarted { tick: Tick(0), kind: ActionKind::Teleport, .. })
    ));
    assert!(seen.iter().any(|e| matches!(e, SimEvent::CommandRejected { tick: Tick(5), .. })));
    assert!(seen.iter().any(|e| matches!(e, SimEvent::ActionEnded { tick: Tick(360), .. })));
    assert!(seen.iter().any(|e| matches!(e, SimEvent::Saved { tick: Tick(370), slot: 0 })));

    let status = runtime.handle().status().await.unwrap();
    assert_eq!(status.clock, Tick(400));
    assert!(status.hazards.is_empty());
    assert_eq!(status.recall_candidates.len(), 1);

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn load_command_uses_configured_slot() {
    let scenario = common::scenario(common::OUTPOST);
    let sim = runtime::build_simulation(&scenario, Default::default()).unwrap();
    let repo = InMemoryStateRepo::new();
    repo.save(4, &sim.snapshot()).unwrap();

    let config = RuntimeConfig {
        save_slot: 4,
        ..RuntimeConfig::default()
    };
    let runtime = Runtime::start(sim, Box::new(repo), config);
    let handle = runtime.handle();

    runtime.drive(&IdleOperator, 25).await.unwrap();
    assert_eq!(handle.clock().await.unwrap(), Tick(25));

    handle.execute(teleport_content::Command::Load).await.unwrap();
    assert_eq!(handle.clock().await.unwrap(), Tick(0));

    runtime.shutdown().await.unwrap();
}
