//! Savora Server - 点餐与菜谱分享后端
//!
//! # 架构概述
//!
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储
//! - **认证** (`auth`): JWT + Argon2 认证体系
//! - **结算** (`checkout`): 购物车到订单的核心工作流
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! savora-server/src/
//! ├── core/          # 配置、状态、错误
//! ├── auth/          # JWT 认证、密码哈希
//! ├── checkout/      # 购物车、下单、订单历史
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层 (模型 + 仓储)
//! └── utils/         # 错误、日志、分页、校验
//! ```

pub mod api;
pub mod auth;
pub mod checkout;
pub mod core;
pub mod db;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use checkout::{CheckoutError, CheckoutService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
   _____
  / ___/____ __   ______  _________ _
  \__ \/ __ `/ | / / __ \/ ___/ __ `/
 ___/ / /_/ /| |/ / /_/ / /  / /_/ /
/____/\__,_/ |___/\____/_/   \__,_/
    "#
    );
}

/// 设置运行环境: 加载 .env 并初始化日志
///
/// 生产环境下日志同时写入 `{data_dir}/logs` 的按日滚动文件。
pub fn setup_environment(config: &Config) -> std::io::Result<()> {
    let log_dir = config.log_dir();
    if config.is_production() {
        config.ensure_data_dir_structure()?;
        init_logger_with_file(
            std::env::var("LOG_LEVEL").ok().as_deref(),
            log_dir.to_str(),
        );
    } else {
        init_logger_with_file(std::env::var("LOG_LEVEL").ok().as_deref(), None);
    }
    Ok(())
}
