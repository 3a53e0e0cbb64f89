//! Cache module for persisting small pieces of state to disk
//!
//! Holds the JSON file cache manager and the recent-search store built on
//! top of it. Nothing here expires; entries are replaced on each write.

mod manager;
mod recent;

pub use manager::CacheManager;
pub use recent::{
    FileRecentSearchStore, MemoryRecentSearchStore, RecentSearchStore, RecentSearches,
    MAX_RECENT_SEARCHES,
};
