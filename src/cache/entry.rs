//! Cache entries and the clock that stamps them.

use serde::{Deserialize, Serialize};

use crate::fetch::Response;

/// A cached response and the time it was captured, in epoch milliseconds.
///
/// Entries are never mutated; an overwrite replaces the whole entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub response: Response,
    pub timestamp: i64,
}

impl CacheEntry {
    /// `true` once the entry is older than `max_age_ms` at `now`.
    pub fn is_expired(&self, now: i64, max_age_ms: u64) -> bool {
        now.saturating_sub(self.timestamp) > i64::try_from(max_age_ms).unwrap_or(i64::MAX)
    }
}

/// Source of the current time for cache timestamps.
pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;
}

/// Wall-clock time via `chrono`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::Headers;

    fn entry_at(timestamp: i64) -> CacheEntry {
        CacheEntry {
            response: Response {
                status_code: 200,
                headers: Headers::new(),
                body: "ok".to_string(),
            },
            timestamp,
        }
    }

    #[test]
    fn test_expiry_boundary() {
        let entry = entry_at(1_000);
        assert!(!entry.is_expired(1_000, 500));
        assert!(!entry.is_expired(1_500, 500));
        assert!(entry.is_expired(1_501, 500));
    }

    #[test]
    fn test_persisted_shape() {
        let json = serde_json::to_value(entry_at(42)).unwrap();
        assert_eq!(json["timestamp"], 42);
        assert_eq!(json["response"]["statusCode"], 200);
        assert_eq!(json["response"]["body"], "ok");
        assert!(json["response"]["headers"].is_object());
    }

    #[test]
    fn test_system_clock_is_recent() {
        // 2020-01-01T00:00:00Z
        assert!(SystemClock.now_millis() > 1_577_836_800_000);
    }
}
