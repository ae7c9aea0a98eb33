//! Simulator configuration loaded from the process environment.
use std::env;
use std::path::PathBuf;

use runtime::LoadPolicy;

const APP_NAME: &str = "teleport-sim";

/// Everything the binary needs before a scenario is loaded.
#[derive(Clone, Debug)]
pub struct SimConfig {
    pub data_dir: PathBuf,
    pub scenario: String,
    pub save_dir: PathBuf,
    pub log_dir: PathBuf,
    pub message_capacity: usize,
    pub save_slot: u64,
    pub load_policy: LoadPolicy,
    /// Overrides the scenario's own run length.
    pub ticks: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            scenario: "demo".to_owned(),
            save_dir: project_dir(|dirs| dirs.data_dir().join("saves"), "./save_data"),
            log_dir: project_dir(|dirs| dirs.cache_dir().join("logs"), "/tmp/teleport-sim/logs"),
            message_capacity: runtime::messages::DEFAULT_CAPACITY,
            save_slot: 0,
            load_policy: LoadPolicy::default(),
            ticks: None,
        }
    }
}

impl SimConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `TELEPORT_DATA_DIR` - Content directory with `config.toml` and `scenarios/`
    /// - `TELEPORT_SCENARIO` - Scenario name (default: demo)
    /// - `TELEPORT_SAVE_DIR` - Snapshot directory (default: platform data dir)
    /// - `TELEPORT_LOG_DIR` - Log file directory (default: platform cache dir)
    /// - `TELEPORT_MESSAGE_CAPACITY` - Operator message log size (default: 64)
    /// - `TELEPORT_SAVE_SLOT` - Slot used by Save and Load commands (default: 0)
    /// - `TELEPORT_LOAD_POLICY` - `preserve` or `reset_to_idle` (default: preserve)
    /// - `TELEPORT_TICKS` - Run length override
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("TELEPORT_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(name) = env::var("TELEPORT_SCENARIO")
            && !name.trim().is_empty()
        {
            config.scenario = name.trim().to_owned();
        }
        if let Ok(dir) = env::var("TELEPORT_SAVE_DIR") {
            config.save_dir = PathBuf::from(dir);
        }
        if let Ok(dir) = env::var("TELEPORT_LOG_DIR") {
            config.log_dir = PathBuf::from(dir);
        }
        if let Some(capacity) = read_env::<usize>("TELEPORT_MESSAGE_CAPACITY") {
            config.message_capacity = capacity.max(1);
        }
        if let Some(slot) = read_env::<u64>("TELEPORT_SAVE_SLOT") {
            config.save_slot = slot;
        }
        if let Some(policy) = read_env::<LoadPolicy>("TELEPORT_LOAD_POLICY") {
            config.load_policy = policy;
        }
        config.ticks = read_env::<u64>("TELEPORT_TICKS");

        config
    }
}

/// Bundled content next to the executable, else the workspace checkout.
fn default_data_dir() -> PathBuf {
    let beside_exe = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("data")))
        .filter(|dir| dir.is_dir());
    beside_exe.unwrap_or_else(|| {
        env::current_dir()
            .unwrap_or_default()
            .join("crates/teleport/content/data")
    })
}

fn project_dir(pick: impl FnOnce(&directories::ProjectDirs) -> PathBuf, fallback: &str) -> PathBuf {
    directories::ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| pick(&dirs))
        .unwrap_or_else(|| PathBuf::from(fallback))
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
