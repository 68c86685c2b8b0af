//! Kitchen Reports Server - 餐厅厨房报表服务
//!
//! # 架构概述
//!
//! 从订单 token (厨房/吧台工单) 计算出餐报表并缓存 30 分钟：
//!
//! - **报表** (`reports`): 时间窗口解析 + 五个聚合器 + 缓存编排
//! - **数据库** (`db`): PostgreSQL 只读仓储 (sqlx)
//! - **缓存** (`cache`): 结构化键空间的 TTL 缓存
//! - **设置** (`settings`): 定时刷新的全局设置快照
//! - **积分** (`loyalty`): 积分换算
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! kitchen-server/src/
//! ├── core/          # 配置、状态、错误、后台任务
//! ├── api/           # HTTP 路由和处理器
//! ├── reports/       # 窗口解析、聚合器、报表服务
//! ├── cache/         # 报表缓存
//! ├── settings/      # 设置快照
//! ├── loyalty/       # 积分换算
//! ├── db/            # 数据库层
//! └── utils/         # 工具函数
//! ```

pub mod api;
pub mod cache;
pub mod core;
pub mod db;
pub mod loyalty;
pub mod reports;
pub mod settings;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, Server, ServerState, build_router};
pub use reports::{KitchenReportService, ReportQuery};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境: 加载 .env、读取配置、初始化日志
pub fn setup_environment() -> Result<Config, crate::core::ConfigError> {
    // .env 不存在时忽略
    let _ = dotenvy::dotenv();
    let config = Config::from_env()?;
    init_logger_with_file(config.log_level.as_deref(), config.log_dir.as_deref());
    Ok(config)
}

pub fn print_banner() {
    println!(
        r#"
   __ __ _ __       __
  / //_/(_) /______/ /_  ___  ____
 / ,<  / / __/ ___/ __ \/ _ \/ __ \
/ /| |/ / /_/ /__/ / / /  __/ / / /
/_/ |_/_/\__/\___/_/ /_/\___/_/ /_/
        Kitchen Reports v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
