// src/jobs/routes.rs

use axum::{
    routing::{delete, get, post},
    Router,
};

use super::handlers;

/// Create the jobs router with public and recruiter routes
pub fn jobs_routes() -> Router {
    Router::new()
        // Public routes
        .route("/api/jobs/public", get(handlers::public_jobs))
        .route("/api/jobs/public/:id", get(handlers::public_job_detail))
        // Recruiter routes
        .route(
            "/api/jobs",
            post(handlers::create_job).get(handlers::list_active_jobs),
        )
        .route("/api/jobs/my-jobs", get(handlers::my_jobs))
        .route("/api/jobs/:id", delete(handlers::delete_job))
}
