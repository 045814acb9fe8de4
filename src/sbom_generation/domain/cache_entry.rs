use super::AuditOutcome;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// CacheEntry: one persisted audit outcome with its expiry time
///
/// An entry whose `expires_at` has passed is treated as absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub key: String,
    pub value: AuditOutcome,
    pub expires_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn new(key: String, value: AuditOutcome, ttl: Duration, now: DateTime<Utc>) -> Self {
        Self {
            key,
            value,
            expires_at: now
                .checked_add_signed(ttl)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
