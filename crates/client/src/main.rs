//! Teleport facility simulator.
//!
//! Composition root: loads engine configuration and a scenario from the
//! content directory, builds the simulation, starts the runtime with a
//! file-backed save repository and replays the scenario's operator script.
//!
//! ```bash
//! TELEPORT_SCENARIO=blackout RUST_LOG=debug cargo run -p teleport-sim
//! ```
mod config;
mod logging;

use anyhow::{Context, Result};
use runtime::{FileStateRepository, Runtime, RuntimeConfig, ScriptedOperator, build_simulation};
use teleport_content::ContentFactory;

use config::SimConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = SimConfig::from_env();
    let _guard = logging::setup_logging(&config.log_dir)?;

    tracing::info!("Starting teleport simulator");
    tracing::info!("Content: {}", config.data_dir.display());
    tracing::info!("Saves: {}", config.save_dir.display());

    let content = ContentFactory::new(&config.data_dir);
    let engine_config = content.load_config()?;
    let scenario = content
        .load_scenario(&config.scenario)
        .with_context(|| format!("Failed to load scenario '{}'", config.scenario))?;

    let sim = build_simulation(&scenario, engine_config)?
        .with_message_capacity(config.message_capacity);
    let repository = FileStateRepository::new(&config.save_dir)?;
    let runtime = Runtime::start(
        sim,
        Box::new(repository),
        RuntimeConfig {
            save_slot: config.save_slot,
            load_policy: config.load_policy,
            ..RuntimeConfig::default()
        },
    );

    let ticks = config.ticks.unwrap_or(scenario.ticks);
    let operator = ScriptedOperator::from_scenario(&scenario);
    let outcomes = runtime.drive(&operator, ticks).await?;
    tracing::info!(
        "Scenario '{}' ran {} ticks, {} actions ended",
        scenario.name,
        ticks,
        outcomes.len()
    );

    let status = runtime.handle().status().await?;
    println!("== {} @ tick {} ==", scenario.name, status.clock);
    for message in &status.messages {
        println!("{message}");
    }
    for hazard in &status.hazards {
        println!("hazard: {hazard:?}");
    }
    for candidate in &status.recall_candidates {
        println!(
            "recallable: {} ({} charges)",
            candidate.name, candidate.remaining
        );
    }

    runtime.shutdown().await?;
    tracing::info!("Simulator shutdown complete");
    Ok(())
}
