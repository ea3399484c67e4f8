// src/applications/routes.rs

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    get_applications, serve_resume, submit_application, update_application_status,
};

pub fn applications_routes() -> Router {
    Router::new()
        .route(
            "/api/application",
            post(submit_application)
                .get(get_applications)
                .patch(update_application_status),
        )
        .route("/api/resumes/*key", get(serve_resume))
}
