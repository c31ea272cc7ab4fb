//! Auth API Handlers

use axum::{Json, extract::State};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::api::convert;
use crate::auth::CurrentUser;
use crate::auth::password::{hash_password, verify_password};
use crate::core::ServerState;
use crate::db::models::{PublicUser, User, UserRegister, UserUpdate};
use crate::db::repository::UserRepository;
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_URL_LEN, validate_optional_text, validate_payload,
};
use crate::utils::{AppError, AppResponse, AppResult, ok, ok_with_message};

/// 登录请求
#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// 认证响应: 令牌 + 公开用户信息
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: PublicUser,
}

/// POST /api/auth/sign-up - 注册新用户
pub async fn sign_up(
    State(state): State<ServerState>,
    Json(payload): Json<UserRegister>,
) -> AppResult<Json<AppResponse<AuthResponse>>> {
    validate_payload(&payload)?;

    let password_hash = hash_password(&payload.password)
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

    let repo = UserRepository::new(state.db.clone());
    let user = repo
        .create(User {
            id: None,
            name: payload.name,
            email: payload.email.to_lowercase(),
            password_hash,
            image: None,
            is_admin: false,
            created_at: Utc::now(),
        })
        .await
        .map_err(convert::from_repo)?;

    tracing::info!(target: "security", email = %user.email, "User registered");

    let token = issue_token(&state, &user)?;
    Ok(ok_with_message(
        AuthResponse {
            token,
            user: user.into(),
        },
        "User registered",
    ))
}

/// POST /api/auth/sign-in - 登录
///
/// 未知邮箱和错误密码返回同一错误, 防止邮箱枚举。
pub async fn sign_in(
    State(state): State<ServerState>,
    Json(payload): Json<SignInRequest>,
) -> AppResult<Json<AppResponse<AuthResponse>>> {
    let repo = UserRepository::new(state.db.clone());
    let user = repo
        .find_by_email(&payload.email.to_lowercase())
        .await
        .map_err(convert::from_repo)?
        .ok_or_else(AppError::invalid_credentials)?;

    let valid = verify_password(&payload.password, &user.password_hash)
        .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;
    if !valid {
        tracing::warn!(target: "security", email = %user.email, "Sign-in with wrong password");
        return Err(AppError::invalid_credentials());
    }

    let token = issue_token(&state, &user)?;
    Ok(ok(AuthResponse {
        token,
        user: user.into(),
    }))
}

/// GET /api/auth/profile - 当前用户信息
pub async fn profile(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<AppResponse<PublicUser>>> {
    let repo = UserRepository::new(state.db.clone());
    let user = repo
        .find_by_id(&user.id)
        .await
        .map_err(convert::from_repo)?
        .ok_or_else(|| AppError::not_found("User not found"))?;
    Ok(ok(PublicUser::from(user)))
}

/// PUT /api/auth/profile - 更新用户信息 (部分更新)
pub async fn update_profile(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<UserUpdate>,
) -> AppResult<Json<AppResponse<PublicUser>>> {
    validate_optional_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.email, "email", MAX_EMAIL_LEN)?;
    validate_optional_text(&payload.image, "image", MAX_URL_LEN)?;
    if let Some(email) = &payload.email
        && !email.contains('@')
    {
        return Err(AppError::validation("email: must be a valid email address"));
    }

    let payload = UserUpdate {
        email: payload.email.map(|e| e.to_lowercase()),
        ..payload
    };

    let repo = UserRepository::new(state.db.clone());
    let updated = repo.update(&user.id, payload).await.map_err(|e| {
        // The unique email index also guards updates
        match &e {
            crate::db::repository::RepoError::Database(msg) if msg.contains("user_email") => {
                AppError::conflict("Email already in use")
            }
            _ => convert::from_repo(e),
        }
    })?;

    Ok(ok(PublicUser::from(updated)))
}

/// DELETE /api/auth/profile - 注销账户
pub async fn delete_account(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<AppResponse<()>>> {
    let repo = UserRepository::new(state.db.clone());
    let deleted = repo.delete(&user.id).await.map_err(convert::from_repo)?;
    if !deleted {
        return Err(AppError::not_found("User not found"));
    }

    tracing::info!(target: "security", user = %user.id, "Account deleted");
    Ok(ok_with_message((), "Account deleted"))
}

fn issue_token(state: &ServerState, user: &User) -> Result<String, AppError> {
    let user_id = user
        .id
        .as_ref()
        .map(|t| t.to_string())
        .ok_or_else(|| AppError::internal("User record missing id"))?;
    state
        .get_jwt_service()
        .generate_token(&user_id, &user.name, &user.email, user.is_admin)
        .map_err(|e| AppError::internal(format!("Token generation failed: {e}")))
}
