//! Record loading.
//!
//! This module fetches source files through a [`RecordSource`], retries
//! transient failures, parses payroll and expenditure documents, and
//! caches parsed files for a configurable time-to-live.
//!
//! # Example
//!
//! ```no_run
//! use folha_engine::config::LoaderSettings;
//! use folha_engine::loader::{HttpSource, RecordLoader};
//!
//! # async fn run() -> folha_engine::error::EngineResult<()> {
//! let source = HttpSource::new("https://painel.example.org/converted")?;
//! let mut loader = RecordLoader::new(source, LoaderSettings::default());
//! let outcome = loader.load_all(&["2025-04.json", "2025-05.json"]).await;
//! println!("{} records", outcome.records.len());
//! # Ok(())
//! # }
//! ```

mod cache;
mod http;
mod parse;
mod record_loader;
mod retry;
mod source;

pub use cache::SourceCache;
pub use http::HttpSource;
pub use parse::{EXPENDITURE_CONTRACT_TYPE, ParsedSource, SourceKind, parse_source};
pub use record_loader::RecordLoader;
pub use retry::{FetchAttempt, RetryPolicy, fetch_with_retry};
pub use source::{DirectorySource, RecordSource};
