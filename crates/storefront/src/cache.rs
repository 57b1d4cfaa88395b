//! In-memory estimate cache with a time-to-live.
//!
//! Entries are keyed by normalized title and never mutated: a refresh
//! replaces the whole entry. Failures are cached like successes so a title
//! RAWG does not know is not looked up again on every scan.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, SystemTime};

use crate::estimator::EstimateOutcome;

/// How long an estimate stays valid.
pub const DEFAULT_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> SystemTime;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// A cached lookup result.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub value: EstimateOutcome,
    pub stored_at: SystemTime,
}

/// Title-keyed estimate cache shared by all scans of a process.
pub struct EstimateCache {
    entries: Mutex<HashMap<String, Arc<CacheEntry>>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl EstimateCache {
    /// Creates a cache with the default TTL and the system clock.
    pub fn new() -> Self {
        Self::with_clock(DEFAULT_TTL, Arc::new(SystemClock))
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    /// Cache key for a title: trimmed, lowercased, PC-qualified.
    pub fn key_for(title: &str) -> String {
        format!("{}_pc", title.trim().to_lowercase())
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the live entry for `key`, if any.
    ///
    /// An entry is live while its age is below the TTL. Entries stamped in
    /// the future (clock moved back) count as fresh.
    pub fn get(&self, key: &str) -> Option<Arc<CacheEntry>> {
        let entry = {
            let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
            entries.get(key).cloned()?
        };
        let age = self
            .clock
            .now()
            .duration_since(entry.stored_at)
            .unwrap_or(Duration::ZERO);
        (age < self.ttl).then_some(entry)
    }

    /// Stores `value` under `key`, stamped with the current time.
    pub fn insert(&self, key: impl Into<String>, value: EstimateOutcome) -> Arc<CacheEntry> {
        let entry = Arc::new(CacheEntry {
            value,
            stored_at: self.clock.now(),
        });
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), Arc::clone(&entry));
        entry
    }

    /// Number of stored entries, live or expired.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Default for EstimateCache {
    fn default() -> Self {
        Self::new()
    }
}
