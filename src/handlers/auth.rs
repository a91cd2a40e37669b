use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};
use sqlx::PgPool;
use tracing::info;
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    models::user::{LoginRequest, LoginResponse, SignupRequest, UpdateUserRequest, User, UserResponse},
    repositories::UserRepository,
    types::UserId,
    utils::{
        jwt::create_access_token,
        password::{hash_password, verify_password},
    },
};

pub async fn signup(
    State((pool, _config)): State<(PgPool, Config)>,
    Json(payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    payload.validate()?;

    let email = payload.email.trim().to_lowercase();
    let password_hash = hash_password(&payload.password)
        .map_err(AppError::InternalServerError)?;

    // A duplicate email trips the unique constraint and maps to Conflict.
    let user = UserRepository::new()
        .create(
            &pool,
            &email,
            &password_hash,
            payload.first_name.trim(),
            payload.last_name.trim(),
            payload.role,
        )
        .await?;

    info!(user_id = %user.id, "user registered");
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

pub async fn login(
    State((pool, config)): State<(PgPool, Config)>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let email = payload.email.trim().to_lowercase();
    let user = UserRepository::new()
        .find_by_email(&pool, &email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid email or password".to_string()))?;

    let valid = verify_password(&payload.password, &user.password_hash)
        .map_err(AppError::InternalServerError)?;
    if !valid {
        return Err(AppError::Unauthorized("Invalid email or password".to_string()));
    }

    let token = create_access_token(
        user.id,
        user.email.clone(),
        user.role.as_str().to_string(),
        &config.jwt_secret,
        config.jwt_expiration_hours,
    )
    .map_err(AppError::InternalServerError)?;

    Ok(Json(LoginResponse {
        token,
        user_id: user.id,
    }))
}

pub async fn update_user(
    State((pool, _config)): State<(PgPool, Config)>,
    Extension(current): Extension<User>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    payload.validate()?;
    ensure_self_or_admin(&current, payload.id)?;

    let email = payload.email.trim().to_lowercase();
    let password_hash = hash_password(&payload.password)
        .map_err(AppError::InternalServerError)?;

    // Only an admin may change a role.
    let role = if current.is_admin() {
        payload.role
    } else {
        current.role
    };

    let user = UserRepository::new()
        .update(
            &pool,
            payload.id,
            &email,
            &password_hash,
            payload.first_name.trim(),
            payload.last_name.trim(),
            role,
        )
        .await?;

    Ok(Json(UserResponse::from(user)))
}

pub async fn delete_account(
    State((pool, _config)): State<(PgPool, Config)>,
    Extension(current): Extension<User>,
    Path(user_id): Path<UserId>,
) -> Result<StatusCode, AppError> {
    ensure_self_or_admin(&current, user_id)?;

    let removed = UserRepository::new().delete(&pool, user_id).await?;
    if !removed {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    info!(user_id = %user_id, "user account deleted");
    Ok(StatusCode::NO_CONTENT)
}

fn ensure_self_or_admin(current: &User, target: UserId) -> Result<(), AppError> {
    if current.id == target || current.is_admin() {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "You may only modify your own account".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::UserRole;
    use chrono::Utc;

    fn user_with(id: i64, role: UserRole) -> User {
        User {
            id: UserId::from(id),
            email: "a@b.c".to_string(),
            password_hash: "hash".to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            role,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn self_access_is_allowed() {
        let user = user_with(7, UserRole::Customer);
        assert!(ensure_self_or_admin(&user, UserId::from(7)).is_ok());
    }

    #[test]
    fn admin_may_touch_other_accounts() {
        let admin = user_with(1, UserRole::Admin);
        assert!(ensure_self_or_admin(&admin, UserId::from(7)).is_ok());
    }

    #[test]
    fn customer_cannot_touch_other_accounts() {
        let user = user_with(7, UserRole::Customer);
        let result = ensure_self_or_admin(&user, UserId::from(8));
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }
}
