//! Kitchen report service
//!
//! resolve → cache lookup → fetch → aggregate → cache store, per metric.
//! Cache failures degrade to a miss and never fail a request.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::models::{
    ItemPerformance, KitchenBarComparison, KitchenEfficiency, KitchenSummary, OrderToken,
    PeakHour, TokenType,
};

use super::range::{DateRange, ReportQuery, resolve_range};
use super::{ReportMetric, comparison, efficiency, items, peak_hours, summary};
use crate::cache::{CacheKey, CacheNamespace, CacheScope, ReportCache};
use crate::db::repository::OrderTokenSource;
use crate::utils::{AppError, AppResult, ErrorCode};

/// Key param used when no token type filter is applied
const ALL_TYPES: &str = "ALL";

type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

#[derive(Clone)]
pub struct KitchenReportService {
    tokens: Arc<dyn OrderTokenSource>,
    cache: Arc<dyn ReportCache>,
    timezone: Tz,
    ttl: Duration,
    clock: Clock,
}

impl KitchenReportService {
    pub fn new(
        tokens: Arc<dyn OrderTokenSource>,
        cache: Arc<dyn ReportCache>,
        timezone: Tz,
        ttl: Duration,
    ) -> Self {
        Self {
            tokens,
            cache,
            timezone,
            ttl,
            clock: Arc::new(Utc::now),
        }
    }

    /// Replace the wall clock used to resolve "today"
    pub fn with_clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        self.clock = Arc::new(clock);
        self
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    fn resolve(&self, query: &ReportQuery) -> AppResult<DateRange> {
        resolve_range(query, self.timezone, (self.clock)())
    }

    fn key(metric: ReportMetric, range: &DateRange) -> CacheKey {
        let [start, end] = range.key_params();
        CacheKey::new(CacheNamespace::KitchenReports, metric.as_str())
            .param(start)
            .param(end)
    }

    fn type_param(token_type: Option<TokenType>) -> &'static str {
        token_type.map_or(ALL_TYPES, |t| t.as_str())
    }

    async fn fetch(
        &self,
        range: &DateRange,
        token_type: Option<TokenType>,
    ) -> AppResult<Vec<OrderToken>> {
        Ok(self.tokens.fetch_tokens(range, token_type).await?)
    }

    /// Serve `key` from cache or compute and store it
    async fn cached<T, F, Fut>(&self, key: CacheKey, compute: F) -> AppResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        match self.cache.get(&key).await {
            Ok(Some(value)) => match serde_json::from_value::<T>(value) {
                Ok(hit) => {
                    tracing::debug!(key = %key, "Report cache hit");
                    return Ok(hit);
                }
                Err(e) => tracing::warn!(key = %key, error = %e, "Discarding undecodable cache entry"),
            },
            Ok(None) => tracing::debug!(key = %key, "Report cache miss"),
            Err(e) => tracing::warn!(key = %key, error = %e, "Report cache read failed"),
        }

        let report = compute().await?;

        match serde_json::to_value(&report) {
            Ok(value) => {
                if let Err(e) = self.cache.set(key.clone(), value, self.ttl).await {
                    tracing::warn!(key = %key, error = %e, "Report cache write failed");
                }
            }
            Err(e) => tracing::warn!(key = %key, error = %e, "Report not cacheable"),
        }

        Ok(report)
    }

    pub async fn summary(&self, query: &ReportQuery) -> AppResult<KitchenSummary> {
        let range = self.resolve(query)?;
        let token_type = query.token_type()?;
        let key = Self::key(ReportMetric::Summary, &range).param(Self::type_param(token_type));

        self.cached(key, move || async move {
            let tokens = self.fetch(&range, token_type).await?;
            Ok(summary::summarize(&tokens))
        })
        .await
    }

    pub async fn efficiency(&self, query: &ReportQuery) -> AppResult<KitchenEfficiency> {
        let range = self.resolve(query)?;
        let token_type = query.token_type()?;
        let key = Self::key(ReportMetric::Efficiency, &range).param(Self::type_param(token_type));

        self.cached(key, move || async move {
            let tokens = self.fetch(&range, token_type).await?;
            Ok(efficiency::efficiency(&tokens))
        })
        .await
    }

    pub async fn item_performance(&self, query: &ReportQuery) -> AppResult<Vec<ItemPerformance>> {
        let range = self.resolve(query)?;
        let token_type = query.token_type()?;
        let limit = query.limit()?;
        let key = Self::key(ReportMetric::ItemPerformance, &range)
            .param(Self::type_param(token_type))
            .param(limit);

        self.cached(key, move || async move {
            let tokens = self.fetch(&range, token_type).await?;
            Ok(items::item_performance(&tokens, limit))
        })
        .await
    }

    pub async fn peak_hours(&self, query: &ReportQuery) -> AppResult<Vec<PeakHour>> {
        let range = self.resolve(query)?;
        let token_type = query.token_type()?;
        let key = Self::key(ReportMetric::PeakHours, &range).param(Self::type_param(token_type));

        self.cached(key, move || async move {
            let tokens = self.fetch(&range, token_type).await?;
            Ok(peak_hours::peak_hours(&tokens, self.timezone))
        })
        .await
    }

    pub async fn comparison(&self, query: &ReportQuery) -> AppResult<KitchenBarComparison> {
        let range = self.resolve(query)?;
        let key = Self::key(ReportMetric::Comparison, &range);

        self.cached(key, move || async move {
            let tokens = self.fetch(&range, None).await?;
            Ok(comparison::compare(&tokens))
        })
        .await
    }

    /// Drop cached reports of one metric, or all of them
    pub async fn invalidate(&self, metric: Option<ReportMetric>) -> AppResult<usize> {
        let scope = match metric {
            Some(m) => CacheScope::Metric {
                namespace: CacheNamespace::KitchenReports,
                metric: m.as_str(),
            },
            None => CacheScope::Namespace(CacheNamespace::KitchenReports),
        };
        let removed = self.cache.invalidate(&scope).await.map_err(|e| {
            AppError::with_message(ErrorCode::CacheError, format!("Cache invalidation failed: {e}"))
        })?;
        tracing::info!(scope = ?scope, removed, "Kitchen report cache invalidated");
        Ok(removed)
    }
}
