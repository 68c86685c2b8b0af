use std::sync::Arc;
use std::time::Instant;

use sqlx::PgPool;

use crate::cache::MemoryReportCache;
use crate::core::tasks::BackgroundTasks;
use crate::core::{Config, Result};
use crate::db;
use crate::db::repository::{
    MemoryOrderTokenSource, MemorySettingsSource, PgOrderTokenRepository, PgSettingsRepository,
};
use crate::reports::KitchenReportService;
use crate::settings::SettingsStore;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc 实现浅拷贝，clone 成本极低。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Option<PgPool> | PostgreSQL 连接池 (内存模式下为 None) |
/// | reports | KitchenReportService | 厨房报表服务 |
/// | report_cache | MemoryReportCache | 报表缓存 |
/// | settings | SettingsStore | 全局设置快照 |
/// | started_at | Instant | 启动时间 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// PostgreSQL 连接池
    pub db: Option<PgPool>,
    /// 厨房报表服务
    pub reports: KitchenReportService,
    /// 报表缓存 (后台清理任务使用)
    pub report_cache: MemoryReportCache,
    /// 全局设置快照
    pub settings: SettingsStore,
    /// 启动时间 (uptime)
    pub started_at: Instant,
}

impl ServerState {
    /// 初始化服务器状态 (PostgreSQL)
    pub async fn initialize(config: &Config) -> Result<Self> {
        let pool = db::connect(config).await?;

        let tokens = Arc::new(PgOrderTokenRepository::new(pool.clone()));
        let settings = SettingsStore::load(Arc::new(PgSettingsRepository::new(pool.clone()))).await;
        let report_cache = MemoryReportCache::new();
        let reports = KitchenReportService::new(
            tokens,
            Arc::new(report_cache.clone()),
            config.timezone,
            config.report_cache_ttl,
        );

        Ok(Self {
            config: config.clone(),
            db: Some(pool),
            reports,
            report_cache,
            settings,
            started_at: Instant::now(),
        })
    }

    /// 内存模式 (测试/本地开发)
    pub async fn in_memory(
        config: &Config,
        tokens: MemoryOrderTokenSource,
        settings: MemorySettingsSource,
    ) -> Self {
        let settings = SettingsStore::load(Arc::new(settings)).await;
        let report_cache = MemoryReportCache::new();
        let reports = KitchenReportService::new(
            Arc::new(tokens),
            Arc::new(report_cache.clone()),
            config.timezone,
            config.report_cache_ttl,
        );

        Self {
            config: config.clone(),
            db: None,
            reports,
            report_cache,
            settings,
            started_at: Instant::now(),
        }
    }

    /// 启动后台任务
    ///
    /// - settings_refresh: 按 `SETTINGS_REFRESH_SECS` 刷新设置快照
    /// - report_cache_sweep: 按 `CACHE_SWEEP_SECS` 清理过期缓存
    pub fn start_background_tasks(&self) -> BackgroundTasks {
        let mut tasks = BackgroundTasks::new();

        tasks.spawn(
            "settings_refresh",
            self.settings
                .clone()
                .run_refresh(self.config.settings_refresh_interval, tasks.shutdown_token()),
        );
        tasks.spawn(
            "report_cache_sweep",
            self.report_cache
                .clone()
                .run_sweeper(self.config.cache_sweep_interval, tasks.shutdown_token()),
        );

        tasks.log_summary();
        tasks
    }

    /// 运行时间 (秒)
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
