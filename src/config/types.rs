//! Configuration types for the payroll dashboard.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from `dashboard.yaml`.

use std::time::Duration;

use serde::Deserialize;

/// Identifying information about the dashboard.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardMetadata {
    /// The human-readable name of the dashboard.
    pub name: String,
    /// The institution whose payroll is reported.
    pub institution: String,
}

/// Retry settings for source fetches.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RetrySettings {
    /// Total attempts per file, the first one included.
    pub max_attempts: u32,
    /// Delay before the first retry, in milliseconds.
    pub base_delay_ms: u64,
    /// Upper bound of any single delay, in milliseconds.
    pub max_delay_ms: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 500,
            max_delay_ms: 8_000,
        }
    }
}

/// Settings of the record loader.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoaderSettings {
    /// Retry settings.
    pub retry: RetrySettings,
    /// How long a parsed file stays cached, in seconds.
    pub cache_ttl_secs: u64,
    /// Year stamped on expenditure records, whose files only carry months.
    pub expenditure_year: i32,
}

impl LoaderSettings {
    /// Returns the cache time-to-live.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            retry: RetrySettings::default(),
            cache_ttl_secs: 300,
            expenditure_year: 2025,
        }
    }
}

fn default_top_n() -> usize {
    10
}

/// The complete dashboard configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Dashboard metadata.
    pub metadata: DashboardMetadata,
    /// Source file names, in load order.
    pub sources: Vec<String>,
    /// Loader settings.
    #[serde(default)]
    pub loader: LoaderSettings,
    /// Default size of top-N rankings.
    #[serde(default = "default_top_n")]
    pub top_n_default: usize,
}
