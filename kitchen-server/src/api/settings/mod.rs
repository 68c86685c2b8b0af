//! Settings API 模块 (全局设置快照)
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/settings | GET | 当前快照 |
//! | /api/settings/refresh | POST | 立即从数据库刷新 |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/settings", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::get_snapshot))
        .route("/refresh", post(handler::refresh))
}
