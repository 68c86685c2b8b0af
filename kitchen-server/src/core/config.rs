use std::time::Duration;

use chrono_tz::Tz;
use thiserror::Error;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has an invalid value '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// 服务器配置 - 报表服务的所有配置项
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | DATABASE_URL | (必填) | PostgreSQL 连接串 |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | REPORT_TIMEZONE | UTC | 业务时区 (IANA 名称) |
/// | REPORT_CACHE_TTL_SECS | 1800 | 报表缓存 TTL(秒) |
/// | CACHE_SWEEP_SECS | 300 | 过期缓存清理间隔(秒) |
/// | SETTINGS_REFRESH_SECS | 60 | 设置快照刷新间隔(秒) |
/// | REQUEST_TIMEOUT_MS | 30000 | 请求超时(毫秒) |
/// | DB_MAX_CONNECTIONS | 10 | 连接池大小 |
/// | LOG_LEVEL | info | 日志级别 (RUST_LOG 优先) |
/// | LOG_DIR | - | 日志目录 (存在时写入滚动文件) |
///
/// # 示例
///
/// ```ignore
/// DATABASE_URL=postgres://localhost/pos REPORT_TIMEZONE=Asia/Kolkata cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL 连接串
    pub database_url: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 业务时区 (日/小时分桶)
    pub timezone: Tz,
    /// 报表缓存 TTL
    pub report_cache_ttl: Duration,
    /// 过期缓存清理间隔
    pub cache_sweep_interval: Duration,
    /// 设置快照刷新间隔
    pub settings_refresh_interval: Duration,
    /// 请求超时时间
    pub request_timeout: Duration,
    /// 数据库最大连接数
    pub db_max_connections: u32,
    pub log_level: Option<String>,
    pub log_dir: Option<String>,
}

impl Config {
    /// 从环境变量加载配置
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源加载配置
    ///
    /// 测试中使用闭包代替进程环境变量
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let timezone = match get("REPORT_TIMEZONE") {
            Some(name) => name.parse::<Tz>().map_err(|_| ConfigError::Invalid {
                key: "REPORT_TIMEZONE",
                value: name.clone(),
            })?,
            None => chrono_tz::UTC,
        };

        Ok(Self {
            database_url,
            http_port: parse_or(&get, "HTTP_PORT", 3000)?,
            environment: get("ENVIRONMENT").unwrap_or_else(|| "development".into()),
            timezone,
            report_cache_ttl: Duration::from_secs(parse_or(&get, "REPORT_CACHE_TTL_SECS", 1800)?),
            cache_sweep_interval: Duration::from_secs(parse_or(&get, "CACHE_SWEEP_SECS", 300)?),
            settings_refresh_interval: Duration::from_secs(parse_or(
                &get,
                "SETTINGS_REFRESH_SECS",
                60,
            )?),
            request_timeout: Duration::from_millis(parse_or(&get, "REQUEST_TIMEOUT_MS", 30_000)?),
            db_max_connections: parse_or(&get, "DB_MAX_CONNECTIONS", 10)?,
            log_level: get("LOG_LEVEL"),
            log_dir: get("LOG_DIR"),
        })
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

fn parse_or<T, G>(get: &G, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid { key, value: raw }),
        None => Ok(default),
    }
}
