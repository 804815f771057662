//! Persistent response cache.
//!
//! A capacity- and age-bounded map from normalized request URL to the response
//! obtained for it, mirrored to a single JSON file. The in-memory map is the
//! source of truth for the life of the process: it is loaded once at
//! construction and the file is rewritten after every mutation. Persistence
//! failures are logged and swallowed, degrading to a transient cache.
//!
//! One mutex guards both the map and the file write, so concurrent
//! `get`/`set`/`clear` calls keep `len() <= max_size`.

mod entry;
mod persist;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use log::{debug, warn};

use crate::config::Config;
use crate::fetch::Response;

pub use entry::{CacheEntry, Clock, SystemClock};

/// Cache limits and backing file.
#[derive(Debug, Clone)]
pub struct CacheSettings {
    pub enabled: bool,
    pub max_age_ms: u64,
    pub max_size: usize,
    /// `None` keeps the cache in memory only
    pub path: Option<PathBuf>,
}

impl From<&Config> for CacheSettings {
    fn from(config: &Config) -> Self {
        Self {
            enabled: config.cache_enabled,
            max_age_ms: config.cache_max_age_ms,
            max_size: config.cache_max_size,
            path: Some(config.cache_path.clone()),
        }
    }
}

/// The response cache. Share it between clients behind an `Arc`.
pub struct ResponseCache {
    settings: CacheSettings,
    entries: Mutex<HashMap<String, CacheEntry>>,
    clock: Box<dyn Clock>,
}

impl ResponseCache {
    /// Builds a cache using wall-clock time, loading any existing file.
    pub fn new(settings: CacheSettings) -> Self {
        Self::with_clock(settings, SystemClock)
    }

    /// Builds a cache with a custom clock, loading any existing file.
    pub fn with_clock(settings: CacheSettings, clock: impl Clock + 'static) -> Self {
        let entries = match settings.path.as_deref() {
            Some(path) => match persist::load_entries(path) {
                Ok(entries) => {
                    debug!("Loaded {} cache entries from {}", entries.len(), path.display());
                    entries
                }
                Err(e) => {
                    warn!("Failed to initialize cache: {e}");
                    HashMap::new()
                }
            },
            None => HashMap::new(),
        };

        Self {
            settings,
            entries: Mutex::new(entries),
            clock: Box::new(clock),
        }
    }

    pub fn settings(&self) -> &CacheSettings {
        &self.settings
    }

    /// Returns the cached response for `url` if it is still fresh.
    ///
    /// An entry older than `max_age_ms` is removed (and the removal persisted)
    /// and reported as absent.
    pub fn get(&self, url: &str) -> Option<Response> {
        if !self.settings.enabled {
            return None;
        }

        let mut entries = self.lock();
        let entry = entries.get(url)?;
        let now = self.clock.now_millis();
        if entry.is_expired(now, self.settings.max_age_ms) {
            debug!("Cache entry for {url} expired");
            entries.remove(url);
            self.persist(&entries);
            return None;
        }
        Some(entry.response.clone())
    }

    /// Stores `response` under `url`.
    ///
    /// No-op when caching is disabled or `max_size` is 0, for statuses
    /// `>= 400`, or when `cache-control` contains `no-store`. At capacity, the entry with the
    /// smallest timestamp is evicted first (ties go to the lexicographically
    /// smallest URL); overwriting an existing URL never evicts.
    pub fn set(&self, url: &str, response: &Response) {
        if !self.settings.enabled
            || self.settings.max_size == 0
            || response.status_code >= 400
            || response.is_no_store()
        {
            return;
        }

        let mut entries = self.lock();
        if !entries.contains_key(url) && entries.len() >= self.settings.max_size {
            if let Some(oldest) = oldest_key(&entries) {
                debug!("Cache full, evicting {oldest}");
                entries.remove(&oldest);
            }
        }

        entries.insert(
            url.to_string(),
            CacheEntry {
                response: response.clone(),
                timestamp: self.clock.now_millis(),
            },
        );
        self.persist(&entries);
    }

    /// Removes every entry and persists the empty map.
    pub fn clear(&self) {
        let mut entries = self.lock();
        entries.clear();
        self.persist(&entries);
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.lock().contains_key(url)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        // A panic while holding the lock cannot leave the map half-updated
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn persist(&self, entries: &HashMap<String, CacheEntry>) {
        let Some(path) = self.settings.path.as_deref() else {
            return;
        };
        if let Err(e) = persist::save_entries(path, entries) {
            warn!("Failed to save cache: {e}");
        }
    }
}

fn oldest_key(entries: &HashMap<String, CacheEntry>) -> Option<String> {
    entries
        .iter()
        .min_by(|(a_key, a), (b_key, b)| a.timestamp.cmp(&b.timestamp).then(a_key.cmp(b_key)))
        .map(|(key, _)| key.clone())
}
