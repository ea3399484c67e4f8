// src/users/routes.rs

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;

/// Create the users router
pub fn users_routes() -> Router {
    Router::new()
        .route("/api/user/role", post(handlers::set_role))
        .route("/api/users/check", get(handlers::check_user))
}
