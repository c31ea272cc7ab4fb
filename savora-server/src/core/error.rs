use thiserror::Error;

/// 服务器启动和运行期错误
///
/// API 请求错误用 [`crate::utils::AppError`]; 这里只覆盖 HTTP 循环之外的
/// 失败路径 (端口绑定、数据目录、数据库打开)。
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("数据库错误: {0}")]
    Database(String),

    #[error("内部服务器错误: {0}")]
    Internal(#[from] anyhow::Error),
}

/// 服务器启动期的 Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;
