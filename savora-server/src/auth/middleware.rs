//! 认证中间件
//!
//! 为 JWT 认证提供 Axum 中间件

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;
use crate::utils::AppError;

/// 认证中间件 - 要求用户登录
///
/// 从 `Authorization: Bearer <token>` 头提取并验证 JWT。
/// 验证成功后将 [`CurrentUser`] 注入请求扩展。
///
/// # 跳过认证的路径
///
/// - `OPTIONS *` (CORS 预检)
/// - 非 `/api/` 路径 (健康检查等)
/// - `/api/auth/sign-up`, `/api/auth/sign-in`
/// - 目录和菜谱的公开读取接口 (GET)
///
/// # 错误处理
///
/// | 错误 | HTTP 状态码 |
/// |------|------------|
/// | 无 Authorization 头 | 401 Unauthorized |
/// | 令牌过期 | 401 TokenExpired |
/// | 无效令牌 | 401 InvalidToken |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    // 允许 CORS 预检的 OPTIONS 请求 (跳过认证)
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    // 非 API 路由跳过认证 (让它们正常返回 404)
    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    if is_public_api_route(req.method(), path) {
        return Ok(next.run(req).await);
    }

    let jwt_service = state.get_jwt_service();
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            tracing::warn!(target: "security", uri = %req.uri(), "Request without credentials");
            return Err(AppError::unauthorized());
        }
    };

    // 验证令牌
    match jwt_service.validate_token(token) {
        Ok(claims) => {
            let user = CurrentUser::try_from(claims)
                .map_err(|e| AppError::invalid_token(format!("Malformed JWT claims: {}", e)))?;
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!(target: "security", error = %e, uri = %req.uri(), "Token validation failed");
            match e {
                crate::auth::JwtError::ExpiredToken => Err(AppError::TokenExpired),
                other => Err(AppError::invalid_token(other.to_string())),
            }
        }
    }
}

/// 公共 API 路由: 注册/登录和公开的读取接口
fn is_public_api_route(method: &http::Method, path: &str) -> bool {
    if path == "/api/auth/sign-up" || path == "/api/auth/sign-in" {
        return true;
    }

    if method != http::Method::GET {
        return false;
    }

    // 购物车和订单始终需要认证
    if path.starts_with("/api/foods/cart") || path.starts_with("/api/foods/orders") {
        return false;
    }

    path == "/api/foods"
        || path.starts_with("/api/foods/")
        || path == "/api/recipes"
        || path.starts_with("/api/recipes/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;

    #[test]
    fn test_public_routes() {
        assert!(is_public_api_route(&Method::POST, "/api/auth/sign-in"));
        assert!(is_public_api_route(&Method::GET, "/api/foods"));
        assert!(is_public_api_route(&Method::GET, "/api/foods/food:abc"));
        assert!(is_public_api_route(&Method::GET, "/api/recipes/recipe:abc"));
    }

    #[test]
    fn test_protected_routes() {
        assert!(!is_public_api_route(&Method::GET, "/api/foods/cart"));
        assert!(!is_public_api_route(&Method::GET, "/api/foods/orders"));
        assert!(!is_public_api_route(&Method::POST, "/api/foods"));
        assert!(!is_public_api_route(&Method::POST, "/api/recipes"));
        assert!(!is_public_api_route(&Method::GET, "/api/auth/profile"));
    }
}
