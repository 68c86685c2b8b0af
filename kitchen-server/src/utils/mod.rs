//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - [`AppError`] - 应用错误类型 (from shared::error)
//! - [`ApiResponse`] - API 响应信封 (from shared::error)
//! - [`time`] - 业务时区换算
//! - [`money`] - 金额与舍入
//! - [`logger`] - 日志初始化

pub mod logger;
pub mod money;
pub mod time;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
