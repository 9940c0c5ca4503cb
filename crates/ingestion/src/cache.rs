//! Content-addressed cache for parsed raw tables.
//!
//! Only the parse step is cached: every derived stage recomputes from
//! scratch on each run. The cache is owned by the caller and injected where
//! needed, never process-global.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use pricing_core::Result;
use tracing::debug;

use crate::reader::RawTable;

/// Stable key over the file name and its bytes.
fn content_key(file_name: &str, bytes: &[u8]) -> u64 {
    let mut hasher = DefaultHasher::new();
    file_name.hash(&mut hasher);
    bytes.hash(&mut hasher);
    hasher.finish()
}

/// Single-entry cache of the most recently parsed table.
#[derive(Debug, Default)]
pub struct TableCache {
    entry: Option<(u64, RawTable)>,
}

impl TableCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the given file, reusing the cached table when the content is
    /// unchanged.
    pub fn load(&mut self, file_name: &str, bytes: &[u8]) -> Result<&RawTable> {
        let key = content_key(file_name, bytes);
        let hit = matches!(&self.entry, Some((cached, _)) if *cached == key);
        if hit {
            debug!(file_name, "parse cache hit");
        } else {
            debug!(file_name, "parse cache miss");
            let table = RawTable::from_bytes(file_name, bytes)?;
            self.entry = Some((key, table));
        }
        match &self.entry {
            Some((_, table)) => Ok(table),
            None => unreachable!("cache entry populated above"),
        }
    }

    /// Drop the cached table.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    /// Whether the given content is currently cached.
    pub fn is_cached(&self, file_name: &str, bytes: &[u8]) -> bool {
        matches!(&self.entry, Some((cached, _)) if *cached == content_key(file_name, bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &[u8] = b"Partner,Price,Qty\nBrazil,100,10\n";

    #[test]
    fn test_hit_after_load() {
        let mut cache = TableCache::new();
        assert!(!cache.is_cached("t.csv", CSV));
        cache.load("t.csv", CSV).unwrap();
        assert!(cache.is_cached("t.csv", CSV));
    }

    #[test]
    fn test_changed_bytes_replace_the_entry() {
        let mut cache = TableCache::new();
        cache.load("t.csv", CSV).unwrap();

        let updated = b"Partner,Price,Qty\nChile,50,2\n";
        let table = cache.load("t.csv", updated).unwrap();
        assert_eq!(table.rows()[0][0], "Chile");
        assert!(cache.is_cached("t.csv", updated));
        assert!(!cache.is_cached("t.csv", CSV));
    }

    #[test]
    fn test_same_bytes_under_new_name_reparse() {
        let mut cache = TableCache::new();
        cache.load("t.csv", CSV).unwrap();
        assert!(!cache.is_cached("other.csv", CSV));
    }

    #[test]
    fn test_invalidate() {
        let mut cache = TableCache::new();
        cache.load("t.csv", CSV).unwrap();
        cache.invalidate();
        assert!(!cache.is_cached("t.csv", CSV));
    }

    #[test]
    fn test_parse_failure_is_not_cached() {
        let mut cache = TableCache::new();
        assert!(cache.load("t.csv", &[0x81]).is_err());
        assert!(!cache.is_cached("t.csv", &[0x81]));
    }
}
