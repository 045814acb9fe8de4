use super::to_chrono_ttl;
use crate::ports::outbound::CacheStore;
use crate::sbom_generation::domain::{AuditOutcome, CacheEntry};
use crate::shared::Result;
use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use std::time::Duration;

/// InMemoryCacheStore: process-local CacheStore on a concurrent map
///
/// Expired entries are removed when they are read.
pub struct InMemoryCacheStore {
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
}

impl InMemoryCacheStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Number of stored entries, expired ones included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl CacheStore for InMemoryCacheStore {
    async fn get(&self, key: &str) -> Result<Option<AuditOutcome>> {
        let now = Utc::now();
        match self.entries.get(key) {
            None => return Ok(None),
            Some(entry) if !entry.is_expired(now) => return Ok(Some(entry.value.clone())),
            Some(_) => {}
        }

        self.entries
            .remove_if(key, |_, entry| entry.is_expired(now));
        Ok(None)
    }

    async fn set(&self, key: &str, value: &AuditOutcome) -> Result<()> {
        let entry = CacheEntry::new(
            key.to_string(),
            value.clone(),
            to_chrono_ttl(self.ttl),
            Utc::now(),
        );
        self.entries.insert(key.to_string(), entry);
        Ok(())
    }

    fn ttl(&self) -> Duration {
        self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(purl: &str) -> AuditOutcome {
        AuditOutcome {
            coordinates: purl.to_string(),
            description: None,
            reference: format!("https://ossindex.example/component/{}", purl),
            vulnerabilities: vec![],
            license: None,
        }
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let store = InMemoryCacheStore::new(Duration::from_secs(3600));
        store.set("pkg:npm/a@1.0.0", &outcome("pkg:npm/a@1.0.0")).await.unwrap();

        let cached = store.get("pkg:npm/a@1.0.0").await.unwrap();
        assert_eq!(cached, Some(outcome("pkg:npm/a@1.0.0")));
        assert!(store.get("pkg:npm/b@1.0.0").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_overwrite() {
        let store = InMemoryCacheStore::new(Duration::from_secs(3600));
        let mut updated = outcome("k");
        updated.description = Some("updated".to_string());

        store.set("k", &outcome("k")).await.unwrap();
        store.set("k", &updated).await.unwrap();

        assert_eq!(store.get("k").await.unwrap(), Some(updated));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_expired_entry_is_absent_and_removed() {
        let store = InMemoryCacheStore::new(Duration::ZERO);
        store.set("k", &outcome("k")).await.unwrap();

        assert!(store.get("k").await.unwrap().is_none());
        assert!(store.is_empty());
    }
}
