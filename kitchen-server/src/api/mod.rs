//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`kitchen_reports`] - 厨房报表接口
//! - [`settings`] - 全局设置快照接口
//! - [`loyalty`] - 积分换算接口

use axum::Router;

use crate::core::ServerState;

pub mod health;
pub mod kitchen_reports;
pub mod loyalty;
pub mod settings;

// Re-export common types for handlers
pub use crate::utils::{ApiResponse, AppResult};

/// 构建 API 路由 (未绑定状态)
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(health::router())
        .merge(kitchen_reports::router())
        .merge(settings::router())
        .merge(loyalty::router())
}
