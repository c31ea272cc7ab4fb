//! 认证模块
//!
//! - [`jwt`] - JWT 令牌生成与验证
//! - [`password`] - Argon2 密码哈希
//! - [`middleware`] - Bearer 令牌认证中间件
//! - [`extractor`] - [`CurrentUser`] 提取器

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

pub use jwt::{Claims, JwtConfig, JwtError, JwtService};

/// The authenticated user acting on a request
///
/// Built from validated JWT claims by the auth middleware and passed
/// explicitly into handlers instead of being re-read from call context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
}

impl TryFrom<Claims> for CurrentUser {
    type Error = String;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let id: RecordId = claims
            .sub
            .parse()
            .map_err(|_| format!("invalid subject id: {}", claims.sub))?;
        Ok(Self {
            id,
            name: claims.name,
            email: claims.email,
            is_admin: claims.is_admin,
        })
    }
}
