//! 全局设置快照
//!
//! 设置以不可变快照 (`Arc<SettingsSnapshot>`) 的形式传给使用方，后台任务按固定
//! 间隔刷新。刷新失败时保留上一份快照。

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use rust_decimal::Decimal;
use shared::models::SettingsSnapshot;
use shared::models::settings::keys;
use tokio_util::sync::CancellationToken;

use crate::db::RepoResult;
use crate::db::repository::SettingsSource;

/// 设置存储
#[derive(Clone)]
pub struct SettingsStore {
    source: Arc<dyn SettingsSource>,
    current: Arc<RwLock<Arc<SettingsSnapshot>>>,
}

impl SettingsStore {
    /// 以默认值创建 (尚未从数据源加载)
    pub fn new(source: Arc<dyn SettingsSource>) -> Self {
        Self {
            source,
            current: Arc::new(RwLock::new(Arc::new(SettingsSnapshot::defaults(Utc::now())))),
        }
    }

    /// 创建并立即加载一次
    ///
    /// 首次加载失败时使用默认值继续启动。
    pub async fn load(source: Arc<dyn SettingsSource>) -> Self {
        let store = Self::new(source);
        if let Err(e) = store.refresh().await {
            tracing::warn!(error = %e, "Initial settings load failed, using defaults");
        }
        store
    }

    /// 当前快照
    pub fn snapshot(&self) -> Arc<SettingsSnapshot> {
        self.current.read().clone()
    }

    /// 从数据源重新加载
    pub async fn refresh(&self) -> RepoResult<Arc<SettingsSnapshot>> {
        let pairs = self.source.load_all().await?;
        let snapshot = Arc::new(build_snapshot(&pairs, Utc::now()));
        *self.current.write() = snapshot.clone();
        tracing::debug!(entries = pairs.len(), "Settings snapshot refreshed");
        Ok(snapshot)
    }

    /// 后台刷新循环，直到 `shutdown` 被取消
    ///
    /// 由 [`BackgroundTasks`](crate::core::BackgroundTasks) 以 Periodic 任务注册。
    pub async fn run_refresh(self, interval: Duration, shutdown: CancellationToken) {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // 第一次 tick 立即完成，启动时已加载过
        ticker.tick().await;
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = ticker.tick() => {
                    if let Err(e) = self.refresh().await {
                        tracing::warn!(error = %e, "Settings refresh failed, keeping previous snapshot");
                    }
                }
            }
        }
    }
}

/// 由键值对构建快照
///
/// 未知键忽略；缺失或无法解析的值回退为默认值并记录警告。
pub fn build_snapshot(pairs: &[(String, String)], loaded_at: DateTime<Utc>) -> SettingsSnapshot {
    let mut snapshot = SettingsSnapshot::defaults(loaded_at);

    for (key, value) in pairs {
        let value = value.trim();
        match key.as_str() {
            keys::LOYALTY_POINTS_PER_UNIT => {
                if let Some(rate) = parse_rate(key, value) {
                    snapshot.loyalty_points_per_unit = rate;
                }
            }
            keys::LOYALTY_POINT_VALUE => {
                if let Some(rate) = parse_rate(key, value) {
                    snapshot.loyalty_point_value = rate;
                }
            }
            keys::RESERVATIONS_ENABLED => match parse_bool(value) {
                Some(enabled) => snapshot.reservations_enabled = enabled,
                None => tracing::warn!(key = %key, value = %value, "Invalid boolean setting, using default"),
            },
            _ => {}
        }
    }

    snapshot
}

fn parse_rate(key: &str, value: &str) -> Option<Decimal> {
    match value.parse::<Decimal>() {
        Ok(rate) if rate >= Decimal::ZERO => Some(rate),
        _ => {
            tracing::warn!(key = %key, value = %value, "Invalid rate setting, using default");
            None
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
