// src/users/handlers.rs

use axum::extract::{Extension, Json};
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::models::{is_valid_role, SetRoleRequest, SetRoleResponse, User, UserCheckResponse};
use crate::auth::AuthedUser;
use crate::common::{safe_email_log, ApiError, AppState};

/// POST /api/user/role - Select the caller's role (write-once)
pub async fn set_role(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Json(request): Json<SetRoleRequest>,
) -> Result<Json<SetRoleResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    if !is_valid_role(&request.role) {
        return Err(ApiError::BadRequest(
            "Invalid role selected. Role must be either \"candidate\" or \"recruiter\"."
                .to_string(),
        ));
    }

    // Role immutability is enforced by the store itself: the upsert only
    // fires while the stored role is NULL, so two racing selections cannot
    // both win. Zero affected rows means a role was already set.
    let email = authed.email.clone().unwrap_or_default();
    let result = sqlx::query(
        r#"
        INSERT INTO users (id, email, role, created_at, updated_at)
        VALUES (?, ?, ?, datetime('now'), datetime('now'))
        ON CONFLICT(id) DO UPDATE SET role = excluded.role, updated_at = excluded.updated_at
            WHERE users.role IS NULL
        "#,
    )
    .bind(&authed.id)
    .bind(&email)
    .bind(&request.role)
    .execute(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    if result.rows_affected() == 0 {
        warn!(user_id = %authed.id, "Rejected attempt to change an existing role");
        return Err(ApiError::Conflict(
            "Role cannot be changed after initial selection.".to_string(),
        ));
    }

    // The row above is authoritative; mirroring the role into the identity
    // provider's metadata is best-effort and never fails the request.
    if let Err(e) = state
        .identity
        .set_role_metadata(&authed.id, &request.role)
        .await
    {
        warn!(
            error = %e,
            user_id = %authed.id,
            "Failed to mirror role to identity provider"
        );
    }

    info!(
        user_id = %authed.id,
        email = %safe_email_log(&email),
        role = %request.role,
        "User role saved"
    );

    Ok(Json(SetRoleResponse {
        role: request.role,
        message: "Role saved successfully".to_string(),
    }))
}

/// GET /api/users/check - Does the caller have a profile and role yet?
pub async fn check_user(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
) -> Result<Json<UserCheckResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    let role: Option<Option<String>> = sqlx::query_scalar("SELECT role FROM users WHERE id = ?")
        .bind(&authed.id)
        .fetch_optional(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    match role.flatten() {
        Some(role) => Ok(Json(UserCheckResponse {
            exists: true,
            role: Some(role),
        })),
        None => Ok(Json(UserCheckResponse {
            exists: false,
            role: None,
        })),
    }
}

/// Load the caller's user row and require the recruiter role.
///
/// `forbidden_message` lets each endpoint keep its own wording
/// ("Only recruiters can post jobs", "...delete jobs", etc.).
pub async fn require_recruiter(
    db: &SqlitePool,
    user_id: &str,
    forbidden_message: &str,
) -> Result<User, ApiError> {
    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_optional(db)
        .await
        .map_err(ApiError::DatabaseError)?;

    let user = user.ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    match user.role.as_deref() {
        Some("recruiter") => Ok(user),
        _ => Err(ApiError::Forbidden(forbidden_message.to_string())),
    }
}
