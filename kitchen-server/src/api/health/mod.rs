//! 健康检查路由
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /health | GET | 健康检查 (含数据库探测) |

use std::time::Instant;

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

#[derive(Serialize)]
pub struct HealthResponse {
    /// ok | degraded
    status: &'static str,
    version: &'static str,
    /// 运行时间 (秒)
    uptime_seconds: u64,
    /// 报表缓存条目数
    cached_reports: usize,
    database: CheckResult,
}

#[derive(Serialize)]
pub struct CheckResult {
    /// ok | error | skipped
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

async fn check_database(state: &ServerState) -> CheckResult {
    let Some(pool) = &state.db else {
        return CheckResult {
            status: "skipped",
            latency_ms: None,
            error: None,
        };
    };

    let started = Instant::now();
    match sqlx::query("SELECT 1").execute(pool).await {
        Ok(_) => CheckResult {
            status: "ok",
            latency_ms: Some(started.elapsed().as_millis() as u64),
            error: None,
        },
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            CheckResult {
                status: "error",
                latency_ms: None,
                error: Some(e.to_string()),
            }
        }
    }
}

pub async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    let database = check_database(&state).await;
    let status = if database.status == "error" { "degraded" } else { "ok" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.uptime_seconds(),
        cached_reports: state.report_cache.len(),
        database,
    })
}
