//! In-process report cache
//!
//! Entries expire lazily on read; `purge_expired` drops the rest and is run
//! periodically by a background task.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use super::{CacheError, CacheKey, CacheScope, ReportCache};

#[derive(Debug, Clone)]
struct Entry {
    value: Value,
    expires_at: Instant,
}

/// DashMap-backed report cache
#[derive(Debug, Clone, Default)]
pub struct MemoryReportCache {
    entries: Arc<DashMap<CacheKey, Entry>>,
}

impl MemoryReportCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn get_at(&self, key: &CacheKey, now: Instant) -> Option<Value> {
        let expired = match self.entries.get(key) {
            Some(entry) if entry.expires_at > now => return Some(entry.value.clone()),
            Some(_) => true,
            None => false,
        };
        if expired {
            self.entries.remove_if(key, |_, e| e.expires_at <= now);
        }
        None
    }

    /// `retain` that returns how many entries it dropped
    fn remove_where(&self, mut should_drop: impl FnMut(&CacheKey, &Entry) -> bool) -> usize {
        let mut removed = 0;
        self.entries.retain(|key, entry| {
            let dropped = should_drop(key, entry);
            removed += usize::from(dropped);
            !dropped
        });
        removed
    }

    fn purge_expired_at(&self, now: Instant) -> usize {
        self.remove_where(|_, e| e.expires_at <= now)
    }

    /// Drop every expired entry, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        self.purge_expired_at(Instant::now())
    }

    /// Run `purge_expired` every `interval` until `shutdown` is cancelled
    pub async fn run_sweeper(self, interval: Duration, shutdown: CancellationToken) {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        ticker.tick().await;
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = ticker.tick() => {
                    let removed = self.purge_expired();
                    if removed > 0 {
                        tracing::debug!(removed, remaining = self.len(), "Purged expired report cache entries");
                    }
                }
            }
        }
    }
}

#[async_trait]
impl ReportCache for MemoryReportCache {
    async fn get(&self, key: &CacheKey) -> Result<Option<Value>, CacheError> {
        Ok(self.get_at(key, Instant::now()))
    }

    async fn set(&self, key: CacheKey, value: Value, ttl: Duration) -> Result<(), CacheError> {
        let expires_at = Instant::now() + ttl;
        self.entries.insert(key, Entry { value, expires_at });
        Ok(())
    }

    async fn invalidate(&self, scope: &CacheScope) -> Result<usize, CacheError> {
        Ok(self.remove_where(|key, _| scope.matches(key)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheNamespace;
    use serde_json::json;

    fn key(metric: &'static str, param: &str) -> CacheKey {
        CacheKey::new(CacheNamespace::KitchenReports, metric).param(param)
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let cache = MemoryReportCache::new();
        let k = key("summary", "a");
        assert!(cache.get(&k).await.unwrap().is_none());

        cache
            .set(k.clone(), json!({"totalOrders": 3}), Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(
            cache.get(&k).await.unwrap(),
            Some(json!({"totalOrders": 3}))
        );
        // other params are a different key
        assert!(cache.get(&key("summary", "b")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_expired_entry_is_a_miss() {
        let cache = MemoryReportCache::new();
        let k = key("summary", "a");
        cache
            .set(k.clone(), json!(1), Duration::from_secs(60))
            .await
            .unwrap();

        let later = Instant::now() + Duration::from_secs(61);
        assert!(cache.get_at(&k, later).is_none());
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_purge_expired() {
        let cache = MemoryReportCache::new();
        cache
            .set(key("summary", "short"), json!(1), Duration::from_secs(1))
            .await
            .unwrap();
        cache
            .set(key("summary", "long"), json!(2), Duration::from_secs(3600))
            .await
            .unwrap();

        let removed = cache.purge_expired_at(Instant::now() + Duration::from_secs(5));
        assert_eq!(removed, 1);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_removed_count_ignores_concurrent_writers() {
        let cache = MemoryReportCache::new();
        let ttl = Duration::from_secs(60);
        for i in 0..50 {
            cache
                .set(key("summary", &i.to_string()), json!(i), ttl)
                .await
                .unwrap();
        }

        let writer = {
            let cache = cache.clone();
            tokio::spawn(async move {
                for i in 0..200 {
                    cache
                        .set(key("peak-hours", &i.to_string()), json!(i), ttl)
                        .await
                        .unwrap();
                    tokio::task::yield_now().await;
                }
            })
        };

        let removed = cache
            .invalidate(&CacheScope::Metric {
                namespace: CacheNamespace::KitchenReports,
                metric: "summary",
            })
            .await
            .unwrap();
        writer.await.unwrap();

        assert_eq!(removed, 50);
        assert_eq!(cache.len(), 200);
    }

    #[tokio::test]
    async fn test_invalidate_by_scope() {
        let cache = MemoryReportCache::new();
        let ttl = Duration::from_secs(60);
        cache.set(key("summary", "a"), json!(1), ttl).await.unwrap();
        cache.set(key("summary", "b"), json!(2), ttl).await.unwrap();
        cache.set(key("peak-hours", "a"), json!(3), ttl).await.unwrap();

        let removed = cache
            .invalidate(&CacheScope::Metric {
                namespace: CacheNamespace::KitchenReports,
                metric: "summary",
            })
            .await
            .unwrap();
        assert_eq!(removed, 2);
        assert!(cache.get(&key("peak-hours", "a")).await.unwrap().is_some());

        let removed = cache
            .invalidate(&CacheScope::Namespace(CacheNamespace::KitchenReports))
            .await
            .unwrap();
        assert_eq!(removed, 1);
        assert!(cache.is_empty());
    }
}
