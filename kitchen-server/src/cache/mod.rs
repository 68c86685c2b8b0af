//! 报表缓存 - 结构化键空间 + TTL
//!
//! # 键格式
//!
//! ```text
//! namespace:metric:param1:param2:...
//! kitchen-reports:summary:2024-05-01T00:00:00.000Z:2024-05-01T23:59:59.999Z:ALL
//! ```
//!
//! 失效按 [`CacheScope`] 结构化匹配 (命名空间或单个指标)，不做字符串前缀匹配。

pub mod memory;

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub use memory::MemoryReportCache;

/// 键分隔符
pub const KEY_DELIMITER: char = ':';

/// 缓存命名空间
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheNamespace {
    KitchenReports,
}

impl CacheNamespace {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::KitchenReports => "kitchen-reports",
        }
    }
}

impl fmt::Display for CacheNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 缓存键
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub namespace: CacheNamespace,
    pub metric: &'static str,
    pub params: Vec<String>,
}

impl CacheKey {
    pub fn new(namespace: CacheNamespace, metric: &'static str) -> Self {
        Self {
            namespace,
            metric,
            params: Vec::new(),
        }
    }

    /// 追加一个参数 (按顺序参与键渲染)
    pub fn param(mut self, value: impl ToString) -> Self {
        self.params.push(value.to_string());
        self
    }

    /// 渲染为字符串键
    pub fn render(&self) -> String {
        let mut key = String::with_capacity(64);
        key.push_str(self.namespace.as_str());
        key.push(KEY_DELIMITER);
        key.push_str(self.metric);
        for p in &self.params {
            key.push(KEY_DELIMITER);
            key.push_str(p);
        }
        key
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// 失效范围
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheScope {
    /// 整个命名空间
    Namespace(CacheNamespace),
    /// 命名空间内的单个指标
    Metric {
        namespace: CacheNamespace,
        metric: &'static str,
    },
}

impl CacheScope {
    pub fn matches(&self, key: &CacheKey) -> bool {
        match self {
            Self::Namespace(ns) => key.namespace == *ns,
            Self::Metric { namespace, metric } => {
                key.namespace == *namespace && key.metric == *metric
            }
        }
    }
}

/// 缓存错误
///
/// 调用方记录日志后按未命中处理。
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("cache backend unavailable: {0}")]
    Backend(String),
}

/// 报表缓存接口
#[async_trait]
pub trait ReportCache: Send + Sync {
    async fn get(&self, key: &CacheKey) -> Result<Option<Value>, CacheError>;

    async fn set(&self, key: CacheKey, value: Value, ttl: Duration) -> Result<(), CacheError>;

    /// 删除范围内所有键，返回删除数量
    async fn invalidate(&self, scope: &CacheScope) -> Result<usize, CacheError>;
}
