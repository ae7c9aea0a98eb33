//! Asynchronous abstraction for sourcing operator intent.
//!
//! Runtime users plug in [`OperatorProvider`] implementations so the
//! simulation can run from a scenario script, a UI or a test fixture.

use async_trait::async_trait;
use teleport_content::{Command, Scenario, ScriptStep};
use teleport_core::Tick;

use crate::error::Result;

/// Trait for providing operator commands at a given clock value.
#[async_trait]
pub trait OperatorProvider: Send + Sync {
    /// Commands to apply before the tick after `clock` is stepped.
    async fn commands_at(&self, clock: Tick) -> Result<Vec<Command>>;
}

/// Replays a fixed script, keyed by clock value.
pub struct ScriptedOperator {
    steps: Vec<ScriptStep>,
}

impl ScriptedOperator {
    pub fn new(steps: Vec<ScriptStep>) -> Self {
        Self { steps }
    }

    pub fn from_scenario(scenario: &Scenario) -> Self {
        Self::new(scenario.script.clone())
    }
}

#[async_trait]
impl OperatorProvider for ScriptedOperator {
    async fn commands_at(&self, clock: Tick) -> Result<Vec<Command>> {
        Ok(self
            .steps
            .iter()
            .filter(|step| step.at == clock.0)
            .map(|step| step.command.clone())
            .collect())
    }
}

/// Operator that never issues anything.
pub struct IdleOperator;

#[async_trait]
impl OperatorProvider for IdleOperator {
    async fn commands_at(&self, _clock: Tick) -> Result<Vec<Command>> {
        Ok(Vec::new())
    }
}
