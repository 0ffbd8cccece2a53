//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the
//! dashboard configuration from YAML.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{DashboardConfig, DashboardMetadata, LoaderSettings};

/// Name of the configuration file inside the configuration directory.
pub const CONFIG_FILE_NAME: &str = "dashboard.yaml";

/// Loads and provides access to the dashboard configuration.
///
/// # Directory Structure
///
/// ```text
/// config/folha/
/// └── dashboard.yaml   # Metadata, source list, loader settings
/// ```
///
/// # Example
///
/// ```no_run
/// use folha_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/folha").unwrap();
/// println!("Dashboard: {}", loader.metadata().name);
/// for source in loader.sources() {
///     println!("Source: {}", source);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: DashboardConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `dashboard.yaml` is missing
    /// - the file contains invalid YAML or misses a required field
    /// - the retry settings allow no attempt at all
    ///
    /// # Example
    ///
    /// ```no_run
    /// use folha_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/folha")?;
    /// # Ok::<(), folha_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let config_path = path.as_ref().join(CONFIG_FILE_NAME);
        let config = Self::load_yaml::<DashboardConfig>(&config_path)?;

        if config.loader.retry.max_attempts == 0 {
            return Err(EngineError::ConfigParseError {
                path: config_path.display().to_string(),
                message: "loader.retry.max_attempts must be at least 1".to_string(),
            });
        }

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying dashboard configuration.
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Returns the dashboard metadata.
    pub fn metadata(&self) -> &DashboardMetadata {
        &self.config.metadata
    }

    /// Returns the configured source file names, in load order.
    pub fn sources(&self) -> &[String] {
        &self.config.sources
    }

    /// Returns the loader settings.
    pub fn loader_settings(&self) -> &LoaderSettings {
        &self.config.loader
    }

    /// Returns the default size of top-N rankings.
    pub fn top_n_default(&self) -> usize {
        self.config.top_n_default
    }
}
