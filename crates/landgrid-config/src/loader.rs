//! Configuration loader with multi-source merging.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::LandgridConfig;

/// Configuration loader with builder pattern.
pub struct ConfigLoader {
    project_dir: PathBuf,
    env_prefix: String,
}

impl ConfigLoader {
    /// Creates a loader rooted at the current directory.
    pub fn new() -> Self {
        Self {
            project_dir: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            env_prefix: "LANDGRID".to_string(),
        }
    }

    /// Sets the project directory.
    #[must_use]
    pub fn with_project_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.project_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Sets the environment variable prefix (default: `LANDGRID`).
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Loads configuration from all sources with proper precedence.
    pub fn load(self) -> Result<LandgridConfig> {
        let mut builder = config::Config::builder();

        // 1. Built-in defaults
        let defaults = LandgridConfig::default();
        builder = builder.add_source(config::Config::try_from(&defaults)?);

        // 2. Project config (landgrid.toml)
        let project_file = self.project_dir.join("landgrid.toml");
        if project_file.exists() {
            builder = builder.add_source(
                config::File::from(project_file)
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // 3. Local config (landgrid.local.toml, gitignored)
        let local_file = self.project_dir.join("landgrid.local.toml");
        if local_file.exists() {
            builder = builder.add_source(
                config::File::from(local_file)
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // 4. Environment variables (LANDGRID_*)
        builder = builder.add_source(
            config::Environment::with_prefix(&self.env_prefix)
                .separator("_")
                .try_parsing(true),
        );

        let merged = builder.build().context("Failed to build configuration")?;
        merged
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Loads configuration or returns defaults if loading fails.
    pub fn load_or_default(self) -> LandgridConfig {
        self.load().unwrap_or_default()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_defaults_from_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = ConfigLoader::new()
            .with_project_dir(dir.path())
            .with_env_prefix("LANDGRID_TEST_NONE")
            .load()
            .unwrap();
        assert_eq!(cfg, LandgridConfig::default());
    }

    #[test]
    fn test_project_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("landgrid.toml"),
            "[pagination]\ndefault_limit = 25\n",
        )
        .unwrap();
        let cfg = ConfigLoader::new()
            .with_project_dir(dir.path())
            .with_env_prefix("LANDGRID_TEST_NONE")
            .load()
            .unwrap();
        assert_eq!(cfg.pagination.default_limit, 25);
        // Untouched sections keep their defaults.
        assert_eq!(cfg.pagination.max_limit, 100);
    }

    #[test]
    fn test_local_file_overrides_project_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("landgrid.toml"),
            "[server]\nbind_addr = \"0.0.0.0:8000\"\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("landgrid.local.toml"),
            "[server]\nbind_addr = \"127.0.0.1:9000\"\n",
        )
        .unwrap();
        let cfg = ConfigLoader::new()
            .with_project_dir(dir.path())
            .with_env_prefix("LANDGRID_TEST_NONE")
            .load()
            .unwrap();
        assert_eq!(cfg.server.bind_addr, "127.0.0.1:9000");
    }
}
