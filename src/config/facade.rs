//! Config loader: assembles sources in precedence order and deserializes.

use config::{Environment, File};
use std::path::Path;

use crate::config::merge::merge_policy::builder_with_defaults;
use crate::config::sources::{global_file, workspace_file};
use crate::config::WaypostConfig;
use crate::error::ApiError;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace.
    ///
    /// Precedence (lowest to highest): defaults, global file, workspace
    /// `config/config.toml`, `config/{WAYPOST_ENV}.toml`, `WAYPOST__*` env vars.
    pub fn load(workspace_root: &Path) -> Result<WaypostConfig, ApiError> {
        let builder = builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let config = builder.add_source(env_source()).build()?;
        Ok(config.try_deserialize()?)
    }

    /// Load configuration from one explicit file, still honoring env overrides.
    pub fn load_from_file(path: &Path) -> Result<WaypostConfig, ApiError> {
        if !path.exists() {
            return Err(ApiError::ConfigError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let config = builder_with_defaults()?
            .add_source(File::from(path))
            .add_source(env_source())
            .build()?;
        Ok(config.try_deserialize()?)
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("WAYPOST")
        .prefix_separator("__")
        .separator("__")
}
