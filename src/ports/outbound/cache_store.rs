use crate::sbom_generation::domain::AuditOutcome;
use crate::shared::Result;
use async_trait::async_trait;
use std::time::Duration;

/// CacheStore port for the persistent, TTL-aware audit outcome cache
///
/// Keys are purl strings. Entries are written with the store's own TTL and
/// an expired entry must read back as `None`. Implementations must be
/// `Send + Sync`; point reads and writes need no cross-key locking.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Returns the live entry for `key`, or `None` if absent or expired
    async fn get(&self, key: &str) -> Result<Option<AuditOutcome>>;

    /// Creates or overwrites the entry for `key`
    async fn set(&self, key: &str, value: &AuditOutcome) -> Result<()>;

    /// Time-to-live applied to every write
    fn ttl(&self) -> Duration;
}
