//! Engine configuration loader.

use std::path::Path;

use teleport_core::TeleportConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`TeleportConfig`] from TOML files.
///
/// Every key is optional; missing keys keep their defaults.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(path: &Path) -> LoadResult<TeleportConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<TeleportConfig> {
        let config: TeleportConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.energy_window <= 0.0 {
            anyhow::bail!("energy_window must be positive, got {}", config.energy_window);
        }
        for (key, radius) in [
            ("scatter_radius", config.scatter_radius),
            ("default_recall_radius", config.default_recall_radius),
            ("large_recall_radius", config.large_recall_radius),
        ] {
            if radius > TeleportConfig::MAX_RADIUS {
                anyhow::bail!(
                    "{key} must be at most {}, got {radius}",
                    TeleportConfig::MAX_RADIUS
                );
            }
        }
        Ok(config)
    }
}
