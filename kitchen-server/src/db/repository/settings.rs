//! Settings Repository
//!
//! Raw key-value pairs of the `settings` table.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use sqlx::PgPool;

use crate::db::RepoResult;

/// Source of raw setting pairs
#[async_trait]
pub trait SettingsSource: Send + Sync {
    async fn load_all(&self) -> RepoResult<Vec<(String, String)>>;
}

#[derive(Clone)]
pub struct PgSettingsRepository {
    pool: PgPool,
}

impl PgSettingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsSource for PgSettingsRepository {
    async fn load_all(&self) -> RepoResult<Vec<(String, String)>> {
        let rows: Vec<(String, String)> =
            sqlx::query_as("SELECT key, value FROM settings ORDER BY key")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows)
    }
}

/// In-memory settings for tests and local runs
#[derive(Clone, Default)]
pub struct MemorySettingsSource {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl MemorySettingsSource {
    pub fn new<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let values = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            values: Arc::new(RwLock::new(values)),
        }
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.values.write().insert(key.into(), value.into());
    }
}

#[async_trait]
impl SettingsSource for MemorySettingsSource {
    async fn load_all(&self) -> RepoResult<Vec<(String, String)>> {
        let mut pairs: Vec<(String, String)> = self
            .values
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        pairs.sort();
        Ok(pairs)
    }
}
