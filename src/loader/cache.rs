//! Time-to-live cache of parsed source files.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

use super::parse::ParsedSource;

#[derive(Debug, Clone)]
struct CacheEntry {
    stored_at: Instant,
    source: ParsedSource,
}

/// Parsed source files keyed by file name, each valid for a fixed TTL.
///
/// The cache is owned by its loader; nothing is shared between loaders.
/// Time is read from [`tokio::time::Instant`], so a paused test clock
/// drives expiry.
#[derive(Debug, Clone)]
pub struct SourceCache {
    ttl: Duration,
    entries: HashMap<String, CacheEntry>,
}

impl SourceCache {
    /// Creates an empty cache. A zero TTL disables caching.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// Returns the time-to-live of entries.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached source if it has not expired.
    pub fn get(&self, name: &str) -> Option<&ParsedSource> {
        self.entries
            .get(name)
            .filter(|entry| entry.stored_at.elapsed() < self.ttl)
            .map(|entry| &entry.source)
    }

    /// Stores a parsed source, replacing any previous entry.
    pub fn insert(&mut self, name: impl Into<String>, source: ParsedSource) {
        if self.ttl.is_zero() {
            return;
        }
        self.entries.insert(
            name.into(),
            CacheEntry {
                stored_at: Instant::now(),
                source,
            },
        );
    }

    /// Drops every entry.
    pub fn invalidate(&mut self) {
        self.entries.clear();
    }

    /// Drops the entry of one file. Returns true if there was one.
    pub fn invalidate_file(&mut self, name: &str) -> bool {
        self.entries.remove(name).is_some()
    }

    /// Drops expired entries.
    pub fn purge_expired(&mut self) {
        let ttl = self.ttl;
        self.entries.retain(|_, entry| entry.stored_at.elapsed() < ttl);
    }

    /// Returns the number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::parse::SourceKind;
    use crate::models::PayrollRecord;

    fn parsed(nome: &str) -> ParsedSource {
        ParsedSource {
            kind: SourceKind::Payroll,
            competencia: Some("2025-04".to_string()),
            records: vec![PayrollRecord {
                nome: nome.to_string(),
                ..Default::default()
            }],
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_entries_expire_after_ttl() {
        let mut cache = SourceCache::new(Duration::from_secs(60));
        cache.insert("2025-04.json", parsed("ANA"));

        tokio::time::advance(Duration::from_secs(59)).await;
        assert!(cache.get("2025-04.json").is_some());

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(cache.get("2025-04.json").is_none());
        assert_eq!(cache.len(), 1);

        cache.purge_expired();
        assert!(cache.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_insert_refreshes_entry() {
        let mut cache = SourceCache::new(Duration::from_secs(10));
        cache.insert("a.json", parsed("ANA"));
        tokio::time::advance(Duration::from_secs(8)).await;
        cache.insert("a.json", parsed("BIA"));
        tokio::time::advance(Duration::from_secs(8)).await;

        let cached = cache.get("a.json").unwrap();
        assert_eq!(cached.records[0].nome, "BIA");
    }

    #[test]
    fn test_invalidate() {
        let mut cache = SourceCache::new(Duration::from_secs(60));
        cache.insert("a.json", parsed("ANA"));
        cache.insert("b.json", parsed("BIA"));

        assert!(cache.invalidate_file("a.json"));
        assert!(!cache.invalidate_file("a.json"));
        assert!(cache.get("b.json").is_some());

        cache.invalidate();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_zero_ttl_disables_caching() {
        let mut cache = SourceCache::new(Duration::ZERO);
        cache.insert("a.json", parsed("ANA"));
        assert!(cache.get("a.json").is_none());
        assert!(cache.is_empty());
    }
}
