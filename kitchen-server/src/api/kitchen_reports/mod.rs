//! Kitchen Reports API 模块 (厨房报表)
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/kitchen-reports/summary | GET | 概览 |
//! | /api/kitchen-reports/efficiency | GET | 出餐效率 |
//! | /api/kitchen-reports/item-performance | GET | 菜品排行 |
//! | /api/kitchen-reports/peak-hours | GET | 高峰时段 |
//! | /api/kitchen-reports/comparison | GET | 厨房/吧台对比 |
//! | /api/kitchen-reports/cache | DELETE | 清除报表缓存 |
//!
//! 公共查询参数: `date`, `startDate`, `endDate`, `filterType`, `filterValue`,
//! `tokenType`；菜品排行另有 `limit`。

mod handler;

use axum::{
    Router,
    routing::{delete, get},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/kitchen-reports", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/summary", get(handler::summary))
        .route("/efficiency", get(handler::efficiency))
        .route("/item-performance", get(handler::item_performance))
        .route("/peak-hours", get(handler::peak_hours))
        .route("/comparison", get(handler::comparison))
        .route("/cache", delete(handler::invalidate_cache))
}
