// src/common/test_support.rs
//! Shared fixtures for module tests: in-memory database and a fully wired
//! AppState with local storage and unconfigured external clients.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::common::{id_generator, migrations, AppState};
use crate::services::{IdentityService, ScoringService, StorageService};

/// In-memory SQLite pool with the full schema applied.
pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("in-memory connect options")
        .foreign_keys(true);

    // Single connection: each in-memory connection is its own database
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("failed to open in-memory database");

    migrations::run_migrations(&pool)
        .await
        .expect("failed to run migrations");

    pool
}

/// AppState wired against an in-memory database, a temp-dir local storage
/// backend, and unconfigured scoring/identity clients.
pub async fn test_state() -> Arc<RwLock<AppState>> {
    let pool = test_pool().await;

    let resumes_dir = std::env::temp_dir().join(format!(
        "hirehub-test-{}",
        id_generator::generate_raw_id(8)
    ));
    tokio::fs::create_dir_all(&resumes_dir)
        .await
        .expect("failed to create temp resumes dir");

    let storage = Arc::new(StorageService::local(
        resumes_dir.clone(),
        "http://localhost:8080/api/resumes".to_string(),
    ));

    let http = reqwest::Client::new();

    let state = AppState {
        db: pool,
        resumes_dir,
        jwt_secret: "test_secret".to_string(),
        storage,
        scoring: Arc::new(ScoringService::new(None, None, http.clone())),
        identity: Arc::new(IdentityService::new(None, None, http)),
    };

    Arc::new(RwLock::new(state))
}

pub async fn insert_user(pool: &SqlitePool, id: &str, email: &str, role: Option<&str>) {
    sqlx::query(
        "INSERT INTO users (id, email, role, created_at, updated_at)
         VALUES (?, ?, ?, datetime('now'), datetime('now'))",
    )
    .bind(id)
    .bind(email)
    .bind(role)
    .execute(pool)
    .await
    .expect("failed to insert test user");
}

/// Minimal valid active job owned by `recruiter_id`.
pub async fn insert_job(pool: &SqlitePool, id: &str, recruiter_id: &str) {
    sqlx::query(
        r#"
        INSERT INTO jobs (
            id, recruiter_id, job_title, company_name, workplace_type,
            job_location, employment_type, job_description, skills,
            industry, job_function, status, created_at, updated_at
        )
        VALUES (?, ?, 'Backend Engineer', 'Acme', 'Remote', 'Berlin',
                'Full-time', 'Build things', '["rust"]', 'Software',
                'Engineering', 'active', datetime('now'), datetime('now'))
        "#,
    )
    .bind(id)
    .bind(recruiter_id)
    .execute(pool)
    .await
    .expect("failed to insert test job");
}
