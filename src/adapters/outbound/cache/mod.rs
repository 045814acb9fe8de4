/// Cache store adapters for audit outcomes
mod file_cache_store;
mod memory_cache_store;

pub use file_cache_store::FileCacheStore;
pub use memory_cache_store::InMemoryCacheStore;

/// Converts a configured TTL, saturating values chrono cannot represent
fn to_chrono_ttl(ttl: std::time::Duration) -> chrono::Duration {
    chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX)
}
