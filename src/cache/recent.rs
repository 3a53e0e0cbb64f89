//! Recent searches
//!
//! A short most-recent-first list of queries plus the last successful
//! query, behind the `RecentSearchStore` trait so the orchestrator does not
//! care where they are kept.

use serde::{Deserialize, Serialize};

use super::CacheManager;

/// Maximum number of recent searches kept
pub const MAX_RECENT_SEARCHES: usize = 5;

const RECENT_SEARCHES_KEY: &str = "recent_searches";
const LAST_QUERY_KEY: &str = "last_query";

/// Up to [`MAX_RECENT_SEARCHES`] distinct queries, most recent first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct RecentSearches(Vec<String>);

impl RecentSearches {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves `query` to the front, dropping any older copy and the oldest
    /// entry once the list is full. Blank queries are ignored.
    pub fn record(&mut self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            return;
        }
        self.0.retain(|existing| existing != query);
        self.0.insert(0, query.to_string());
        self.0.truncate(MAX_RECENT_SEARCHES);
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for RecentSearches {
    /// Normalizes a stored list: blanks and duplicates dropped, capped
    fn from(entries: Vec<String>) -> Self {
        let mut searches = Self::new();
        // Replay oldest first so the first entry ends up in front
        for entry in entries.iter().rev() {
            searches.record(entry);
        }
        searches
    }
}

impl From<RecentSearches> for Vec<String> {
    fn from(searches: RecentSearches) -> Self {
        searches.0
    }
}

/// Where recent searches and the last successful query are kept
pub trait RecentSearchStore {
    /// Current list, most recent first
    fn load(&self) -> Vec<String>;

    /// Records `query` and returns the updated list
    fn record(&mut self, query: &str) -> Vec<String>;

    /// Query to repeat on the next startup, if any
    fn load_last_query(&self) -> Option<String>;

    fn save_last_query(&mut self, query: &str);
}

/// In-memory store; used when no cache directory is available and in tests
#[derive(Debug, Clone, Default)]
pub struct MemoryRecentSearchStore {
    searches: RecentSearches,
    last_query: Option<String>,
}

impl MemoryRecentSearchStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecentSearchStore for MemoryRecentSearchStore {
    fn load(&self) -> Vec<String> {
        self.searches.as_slice().to_vec()
    }

    fn record(&mut self, query: &str) -> Vec<String> {
        self.searches.record(query);
        self.load()
    }

    fn load_last_query(&self) -> Option<String> {
        self.last_query.clone()
    }

    fn save_last_query(&mut self, query: &str) {
        self.last_query = Some(query.to_string());
    }
}

/// Store backed by JSON files in the cache directory
///
/// The list is read once on construction and written after every change.
/// Write failures are logged and otherwise ignored.
#[derive(Debug, Clone)]
pub struct FileRecentSearchStore {
    cache: CacheManager,
    searches: RecentSearches,
}

impl FileRecentSearchStore {
    pub fn new(cache: CacheManager) -> Self {
        let searches = cache
            .read::<RecentSearches>(RECENT_SEARCHES_KEY)
            .unwrap_or_default();
        Self { cache, searches }
    }
}

impl RecentSearchStore for FileRecentSearchStore {
    fn load(&self) -> Vec<String> {
        self.searches.as_slice().to_vec()
    }

    fn record(&mut self, query: &str) -> Vec<String> {
        self.searches.record(query);
        if let Err(err) = self.cache.write(RECENT_SEARCHES_KEY, &self.searches) {
            tracing::warn!(error = %err, "failed to persist recent searches");
        }
        self.load()
    }

    fn load_last_query(&self) -> Option<String> {
        self.cache
            .read::<String>(LAST_QUERY_KEY)
            .filter(|query| !query.trim().is_empty())
    }

    fn save_last_query(&mut self, query: &str) {
        if let Err(err) = self.cache.write(LAST_QUERY_KEY, query) {
            tracing::warn!(error = %err, "failed to persist last query");
        }
    }
}
