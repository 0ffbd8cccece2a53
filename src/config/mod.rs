//! Configuration loading for the payroll dashboard.
//!
//! This module loads the dashboard configuration from YAML: metadata, the
//! ordered list of source files, and the loader's retry and cache
//! settings.
//!
//! # Example
//!
//! ```no_run
//! use folha_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/folha").unwrap();
//! println!("Loaded dashboard: {}", config.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::{CONFIG_FILE_NAME, ConfigLoader};
pub use types::{DashboardConfig, DashboardMetadata, LoaderSettings, RetrySettings};
