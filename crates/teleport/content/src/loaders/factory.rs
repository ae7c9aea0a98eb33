//! Content factory for locating teleport data files.

use std::path::{Path, PathBuf};

use teleport_core::TeleportConfig;

use crate::loaders::{ConfigLoader, LoadResult, ScenarioLoader};
use crate::scenario::Scenario;

/// Content factory that loads all teleport content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── scenarios/
///     ├── demo.ron
///     └── blackout.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load engine configuration from `config.toml`.
    ///
    /// A missing file yields the default configuration.
    pub fn load_config(&self) -> LoadResult<TeleportConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(TeleportConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load a scenario from `scenarios/{name}.ron`.
    pub fn load_scenario(&self, name: &str) -> LoadResult<Scenario> {
        ScenarioLoader::load(&self.scenario_path(name))
    }

    pub fn scenario_path(&self, name: &str) -> PathBuf {
        self.data_dir.join("scenarios").join(format!("{}.ron", name))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
        assert_eq!(
            factory.scenario_path("demo"),
            Path::new("/tmp/data/scenarios/demo.ron")
        );
    }

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let factory = ContentFactory::new("/nonexistent/teleport-data");
        assert_eq!(factory.load_config().unwrap(), TeleportConfig::default());
        assert!(factory.load_scenario("demo").is_err());
    }

    #[test]
    fn bundled_data_loads() {
        let factory = ContentFactory::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"));
        factory.load_config().unwrap();
        for name in ["demo", "blackout"] {
            factory.load_scenario(name).unwrap();
        }
    }
}
