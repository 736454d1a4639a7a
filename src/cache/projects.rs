// Cache manager for fetched project data.
// Keeps one timestamped entry in a session store and enforces its TTL.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::ProjectsConfig;
use crate::error::Result;
use crate::github::Repository;

use super::clock::{Clock, SystemClock};
use super::store::SessionStore;

/// Wrapper for cached data with its creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    /// Milliseconds since the Unix epoch when the entry was written.
    pub timestamp: i64,
    /// The cached data.
    pub data: T,
}

impl<T> CacheEntry<T> {
    pub fn new(data: T, timestamp: i64) -> Self {
        Self { timestamp, data }
    }

    /// Age at `now`. Negative when the entry claims to be from the future.
    pub fn age_millis(&self, now: i64) -> i64 {
        now.saturating_sub(self.timestamp)
    }

    /// An entry exactly `ttl` old is still valid.
    pub fn is_expired(&self, now: i64, ttl: Duration) -> bool {
        let ttl = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
        self.age_millis(now) > ttl
    }
}

/// The single cached list of repositories for one session.
#[derive(Debug)]
pub struct ProjectsCache<S, C = SystemClock> {
    store: S,
    key: String,
    ttl: Duration,
    clock: C,
}

impl<S: SessionStore> ProjectsCache<S, SystemClock> {
    pub fn new(store: S, key: impl Into<String>, ttl: Duration) -> Self {
        Self::with_clock(store, key, ttl, SystemClock)
    }
}

impl<S: SessionStore, C: Clock> ProjectsCache<S, C> {
    pub fn with_clock(store: S, key: impl Into<String>, ttl: Duration, clock: C) -> Self {
        Self {
            store,
            key: key.into(),
            ttl,
            clock,
        }
    }

    /// Cache keyed and timed as `config` says.
    pub fn from_config(store: S, config: &ProjectsConfig, clock: C) -> Self {
        Self::with_clock(store, config.cache_key.as_str(), config.cache_ttl, clock)
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current time according to this cache's clock.
    pub fn now_millis(&self) -> i64 {
        self.clock.now_millis()
    }

    /// Return the cached repositories if a fresh, well-formed entry exists.
    ///
    /// Never fails: a malformed or stale entry is deleted and reads as a miss,
    /// and an unreadable store reads as a miss.
    pub fn read(&mut self) -> Option<Vec<Repository>> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Session store unreadable");
                return None;
            }
        };

        let entry: CacheEntry<Vec<Repository>> = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Discarding malformed cache entry");
                self.discard();
                return None;
            }
        };

        let now = self.clock.now_millis();
        if entry.is_expired(now, self.ttl) {
            tracing::debug!(
                key = %self.key,
                age_ms = entry.age_millis(now),
                "Discarding stale cache entry"
            );
            self.discard();
            return None;
        }

        tracing::debug!(key = %self.key, count = entry.data.len(), "Cache hit");
        Some(entry.data)
    }

    /// Store `records` stamped with the current time, replacing any prior entry.
    pub fn write(&mut self, records: &[Repository]) -> Result<()> {
        let entry = CacheEntry::new(records, self.clock.now_millis());
        let json = serde_json::to_string(&entry)?;
        self.store.set(&self.key, &json)?;

        tracing::info!(key = %self.key, count = records.len(), "Cached projects");
        Ok(())
    }

    /// The raw entry, with no TTL check and no cleanup.
    pub fn entry(&self) -> Option<CacheEntry<Vec<Repository>>> {
        let raw = self.store.get(&self.key).ok()??;
        serde_json::from_str(&raw).ok()
    }

    /// Delete the entry.
    pub fn clear(&mut self) -> Result<()> {
        self.store.remove(&self.key)
    }

    fn discard(&mut self) {
        if let Err(e) = self.store.remove(&self.key) {
            tracing::warn!(key = %self.key, error = %e, "Failed to delete cache entry");
        }
    }
}
