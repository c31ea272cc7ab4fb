//! 工具模块
//!
//! - [`error`] - 统一错误类型和响应结构
//! - [`logger`] - tracing 日志初始化
//! - [`validation`] - 输入校验辅助函数
//! - [`pagination`] - 分页参数和元数据

pub mod error;
pub mod logger;
pub mod pagination;
pub mod validation;

pub use error::{AppError, AppResponse, ok, ok_with_message};
pub use pagination::{PageQuery, Pagination};

/// Result type for API handlers
pub type AppResult<T> = Result<T, AppError>;
