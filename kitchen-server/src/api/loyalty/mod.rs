//! Loyalty API 模块 (积分换算)
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/loyalty/quote | GET | `amount` 可得积分 / `points` 可抵金额 |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/loyalty/quote", get(handler::quote))
}
