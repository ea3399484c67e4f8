//! Tests for users module

#[cfg(test)]
mod tests {
    use axum::extract::{Extension, Json};

    use crate::auth::AuthedUser;
    use crate::common::test_support::test_state;
    use crate::common::ApiError;
    use crate::users::handlers::{check_user, require_recruiter, set_role};
    use crate::users::models::{is_valid_role, SetRoleRequest};

    fn authed(id: &str) -> AuthedUser {
        AuthedUser {
            id: id.to_string(),
            email: Some(format!("{}@example.com", id)),
        }
    }

    #[test]
    fn test_role_values() {
        assert!(is_valid_role("candidate"));
        assert!(is_valid_role("recruiter"));
        assert!(!is_valid_role("admin"));
        assert!(!is_valid_role(""));
        assert!(!is_valid_role("Recruiter"));
    }

    #[tokio::test]
    async fn test_set_role_creates_user() {
        let state = test_state().await;

        let response = set_role(
            Extension(state.clone()),
            authed("user_1"),
            Json(SetRoleRequest {
                role: "candidate".to_string(),
            }),
        )
        .await
        .expect("first role selection should succeed");

        assert_eq!(response.0.role, "candidate");

        let check = check_user(Extension(state), authed("user_1"))
            .await
            .unwrap();
        assert!(check.0.exists);
        assert_eq!(check.0.role.as_deref(), Some("candidate"));
    }

    #[tokio::test]
    async fn test_role_is_write_once() {
        let state = test_state().await;

        set_role(
            Extension(state.clone()),
            authed("user_1"),
            Json(SetRoleRequest {
                role: "recruiter".to_string(),
            }),
        )
        .await
        .unwrap();

        let second = set_role(
            Extension(state.clone()),
            authed("user_1"),
            Json(SetRoleRequest {
                role: "candidate".to_string(),
            }),
        )
        .await;

        assert!(matches!(second, Err(ApiError::Conflict(_))));

        // Role must be unchanged
        let check = check_user(Extension(state), authed("user_1"))
            .await
            .unwrap();
        assert_eq!(check.0.role.as_deref(), Some("recruiter"));
    }

    #[tokio::test]
    async fn test_set_role_fills_existing_roleless_row() {
        let state = test_state().await;
        let db = state.read().await.db.clone();

        // Row exists but no role chosen yet; the guarded upsert must still fire
        crate::common::test_support::insert_user(&db, "user_1", "user_1@example.com", None).await;

        let response = set_role(
            Extension(state.clone()),
            authed("user_1"),
            Json(SetRoleRequest {
                role: "recruiter".to_string(),
            }),
        )
        .await
        .expect("filling a NULL role should succeed");
        assert_eq!(response.0.role, "recruiter");

        // And the same row is now locked
        let second = set_role(
            Extension(state),
            authed("user_1"),
            Json(SetRoleRequest {
                role: "candidate".to_string(),
            }),
        )
        .await;
        assert!(matches!(second, Err(ApiError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_invalid_role_rejected() {
        let state = test_state().await;

        let result = set_role(
            Extension(state),
            authed("user_1"),
            Json(SetRoleRequest {
                role: "admin".to_string(),
            }),
        )
        .await;

        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_check_unknown_user() {
        let state = test_state().await;

        let check = check_user(Extension(state), authed("user_missing"))
            .await
            .unwrap();
        assert!(!check.0.exists);
        assert!(check.0.role.is_none());
    }

    #[tokio::test]
    async fn test_require_recruiter() {
        let state = test_state().await;
        let db = state.read().await.db.clone();

        crate::common::test_support::insert_user(&db, "rec_1", "rec@example.com", Some("recruiter"))
            .await;
        crate::common::test_support::insert_user(&db, "cand_1", "cand@example.com", Some("candidate"))
            .await;

        assert!(require_recruiter(&db, "rec_1", "Only recruiters can post jobs")
            .await
            .is_ok());

        let candidate = require_recruiter(&db, "cand_1", "Only recruiters can post jobs").await;
        assert!(matches!(candidate, Err(ApiError::Forbidden(_))));

        let missing = require_recruiter(&db, "ghost", "Only recruiters can post jobs").await;
        assert!(matches!(missing, Err(ApiError::NotFound(_))));
    }
}
