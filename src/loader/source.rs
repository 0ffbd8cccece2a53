//! Source abstraction and the local directory source.

use std::future::Future;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use crate::error::{EngineError, EngineResult};

/// Somewhere source files can be fetched from by name.
///
/// Implementations classify their failures: a missing file is
/// [`EngineError::SourceNotFound`], a failure that may go away on retry is
/// [`EngineError::SourceUnavailable`], and everything else is permanent.
pub trait RecordSource {
    /// Fetches the raw bytes of one source file.
    fn fetch(&self, name: &str) -> impl Future<Output = EngineResult<Vec<u8>>> + Send;
}

/// Reads source files from a local directory.
///
/// # Example
///
/// ```no_run
/// use folha_engine::loader::{DirectorySource, RecordSource};
///
/// # async fn run() -> folha_engine::error::EngineResult<()> {
/// let source = DirectorySource::new("./public/converted");
/// let bytes = source.fetch("2025-04.json").await?;
/// println!("{} bytes", bytes.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    /// Creates a source rooted at a directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl RecordSource for DirectorySource {
    async fn fetch(&self, name: &str) -> EngineResult<Vec<u8>> {
        // Names are plain file names relative to the root.
        let relative = Path::new(name);
        let escapes_root = relative
            .components()
            .any(|component| !matches!(component, Component::Normal(_)));
        if name.is_empty() || escapes_root {
            return Err(EngineError::SourceNotFound {
                name: name.to_string(),
            });
        }

        tokio::fs::read(self.root.join(relative))
            .await
            .map_err(|error| match error.kind() {
                ErrorKind::NotFound => EngineError::SourceNotFound {
                    name: name.to_string(),
                },
                _ => EngineError::SourceUnavailable {
                    name: name.to_string(),
                    message: error.to_string(),
                },
            })
    }
}
