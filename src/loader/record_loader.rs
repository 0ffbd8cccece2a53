//! The record loader.
//!
//! Fetches source files one after the other, parses them, and merges
//! their records into one flat sequence in file order. Records are never
//! deduplicated: one person legitimately holds several contracts.

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::cache::SourceCache;
use super::parse::parse_source;
use super::retry::{RetryPolicy, fetch_with_retry};
use super::source::RecordSource;
use crate::config::LoaderSettings;
use crate::error::{EngineError, EngineResult};
use crate::models::{Competencia, FileLoadReport, FileLoadStatus, LoadOutcome, PayrollRecord};

/// The result of loading one file.
struct FileLoad {
    result: EngineResult<Vec<PayrollRecord>>,
    attempts: u32,
    from_cache: bool,
}

/// Loads payroll and expenditure records from a [`RecordSource`].
///
/// # Example
///
/// ```no_run
/// use folha_engine::config::ConfigLoader;
/// use folha_engine::loader::{DirectorySource, RecordLoader};
///
/// # async fn run() -> folha_engine::error::EngineResult<()> {
/// let config = ConfigLoader::load("./config/folha")?;
/// let mut loader = RecordLoader::new(
///     DirectorySource::new("./public/converted"),
///     config.loader_settings().clone(),
/// );
///
/// let outcome = loader.load_all(config.sources()).await;
/// for failure in outcome.failures() {
///     eprintln!("skipped {}", failure.name);
/// }
/// println!("{} records", outcome.records.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct RecordLoader<S> {
    source: S,
    settings: LoaderSettings,
    policy: RetryPolicy,
    cache: SourceCache,
}

impl<S: RecordSource> RecordLoader<S> {
    /// Creates a loader with retry and cache behavior from `settings`.
    pub fn new(source: S, settings: LoaderSettings) -> Self {
        let policy = RetryPolicy::from(&settings.retry);
        let cache = SourceCache::new(settings.cache_ttl());
        Self {
            source,
            settings,
            policy,
            cache,
        }
    }

    /// Replaces the retry policy.
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns the cache of parsed files.
    pub fn cache(&self) -> &SourceCache {
        &self.cache
    }

    /// Drops every cached file, so the next load fetches again.
    pub fn invalidate_cache(&mut self) {
        self.cache.invalidate();
    }

    /// Drops one cached file.
    pub fn invalidate_file(&mut self, name: &str) -> bool {
        self.cache.invalidate_file(name)
    }

    /// Loads every file and merges their records in file order.
    ///
    /// A file that cannot be fetched or parsed is reported and skipped;
    /// the other files still load. Every call gets a fresh `load_id` that
    /// tags its log events. Expired cache entries are dropped first.
    pub async fn load_all<N: AsRef<str>>(&mut self, files: &[N]) -> LoadOutcome {
        let load_id = Uuid::new_v4();
        info!(load_id = %load_id, files = files.len(), "Loading source files");

        let cached = self.cache.len();
        self.cache.purge_expired();
        if self.cache.len() < cached {
            debug!(
                load_id = %load_id,
                purged = cached - self.cache.len(),
                "Expired cache entries dropped"
            );
        }

        let mut records = Vec::new();
        let mut reports = Vec::with_capacity(files.len());
        let mut declared_total = 0usize;

        for name in files {
            let name = name.as_ref();
            let load = self.load_file(name).await;

            let status = match load.result {
                Ok(file_records) => {
                    let count = file_records.len();
                    declared_total += count;
                    records.extend(file_records);
                    debug!(
                        load_id = %load_id,
                        file = %name,
                        records = count,
                        attempts = load.attempts,
                        from_cache = load.from_cache,
                        "Source file loaded"
                    );
                    FileLoadStatus::Loaded { records: count }
                }
                Err(error) => {
                    warn!(
                        load_id = %load_id,
                        file = %name,
                        attempts = load.attempts,
                        error = %error,
                        "Source file skipped"
                    );
                    FileLoadStatus::Failed {
                        reason: error.to_string(),
                    }
                }
            };

            reports.push(FileLoadReport {
                name: name.to_string(),
                status,
                attempts: load.attempts,
                from_cache: load.from_cache,
            });
        }

        debug_assert_eq!(records.len(), declared_total);
        let failed = reports.iter().filter(|report| !report.is_loaded()).count();
        info!(
            load_id = %load_id,
            records = records.len(),
            loaded = reports.len() - failed,
            failed,
            "Source files loaded"
        );

        LoadOutcome {
            load_id,
            loaded_at: Utc::now(),
            records,
            reports,
        }
    }

    /// Loads the records of a single file.
    pub async fn load_one(&mut self, name: &str) -> EngineResult<Vec<PayrollRecord>> {
        self.load_file(name).await.result
    }

    /// Loads the file of one competência.
    ///
    /// The file is the first of `files` whose name starts with the
    /// competência in `YYYY-MM` form.
    pub async fn load_competencia<N: AsRef<str>>(
        &mut self,
        files: &[N],
        competencia: &str,
    ) -> EngineResult<Vec<PayrollRecord>> {
        let prefix = competencia.parse::<Competencia>()?.to_string();
        let name = files
            .iter()
            .map(AsRef::<str>::as_ref)
            .find(|name| name.starts_with(&prefix))
            .ok_or_else(|| EngineError::SourceNotFound {
                name: prefix.clone(),
            })?
            .to_string();
        self.load_one(&name).await
    }

    async fn load_file(&mut self, name: &str) -> FileLoad {
        if let Some(cached) = self.cache.get(name) {
            return FileLoad {
                result: Ok(cached.records.clone()),
                attempts: 0,
                from_cache: true,
            };
        }

        let fetched = fetch_with_retry(&self.source, name, &self.policy).await;
        let result = fetched
            .result
            .and_then(|bytes| parse_source(name, &bytes, &self.settings))
            .map(|parsed| {
                let records = parsed.records.clone();
                self.cache.insert(name, parsed);
                records
            });

        FileLoad {
            result,
            attempts: fetched.attempts,
            from_cache: false,
        }
    }
}
