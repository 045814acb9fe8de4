use super::to_chrono_ttl;
use crate::ports::outbound::CacheStore;
use crate::sbom_generation::domain::{AuditOutcome, CacheEntry};
use crate::shared::error::AuditError;
use crate::shared::Result;
use async_trait::async_trait;
use chrono::Utc;
use sha2::{Digest, Sha256};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// FileCacheStore: one JSON record per purl under a cache directory
///
/// File names are the SHA-256 of the key, so any purl maps to a safe name.
/// Each record carries its own `expires_at`; a stale record is deleted when
/// it is read. Writes go through a temporary file and a rename, which keeps
/// each key's record whole under concurrent writers.
pub struct FileCacheStore {
    cache_dir: PathBuf,
    ttl: Duration,
}

impl FileCacheStore {
    pub fn new(cache_dir: PathBuf, ttl: Duration) -> Self {
        Self { cache_dir, ttl }
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let mut hasher = Sha256::new();
        hasher.update(key.as_bytes());
        self.cache_dir.join(format!("{:x}.json", hasher.finalize()))
    }

    fn store_error(key: &str, details: impl std::fmt::Display) -> anyhow::Error {
        AuditError::CacheStore {
            key: key.to_string(),
            details: details.to_string(),
        }
        .into()
    }
}

#[async_trait]
impl CacheStore for FileCacheStore {
    async fn get(&self, key: &str) -> Result<Option<AuditOutcome>> {
        let path = self.path_for(key);
        let data = match tokio::fs::read_to_string(&path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Self::store_error(key, e)),
        };

        let entry: CacheEntry =
            serde_json::from_str(&data).map_err(|e| Self::store_error(key, e))?;
        if entry.key != key {
            return Ok(None);
        }

        if entry.is_expired(Utc::now()) {
            if let Err(e) = tokio::fs::remove_file(&path).await {
                tracing::debug!("Failed to remove stale cache record {}: {}", path.display(), e);
            }
            return Ok(None);
        }
        Ok(Some(entry.value))
    }

    async fn set(&self, key: &str, value: &AuditOutcome) -> Result<()> {
        tokio::fs::create_dir_all(&self.cache_dir)
            .await
            .map_err(|e| Self::store_error(key, e))?;

        let entry = CacheEntry::new(
            key.to_string(),
            value.clone(),
            to_chrono_ttl(self.ttl),
            Utc::now(),
        );
        let data = serde_json::to_string(&entry).map_err(|e| Self::store_error(key, e))?;

        let path = self.path_for(key);
        let temp_path = path.with_extension(format!("json.{}.tmp", uuid::Uuid::new_v4()));
        tokio::fs::write(&temp_path, data)
            .await
            .map_err(|e| Self::store_error(key, e))?;
        if let Err(e) = tokio::fs::rename(&temp_path, &path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(Self::store_error(key, e));
        }
        Ok(())
    }

    fn ttl(&self) -> Duration {
        self.ttl
    }
}
