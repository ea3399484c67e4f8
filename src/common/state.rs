// Application state shared across all modules

use sqlx::SqlitePool;
use std::path::PathBuf;
use std::sync::Arc;

use crate::services::{IdentityService, ScoringService, StorageService};

/// Application state containing the database pool, external-service clients,
/// and configuration
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub resumes_dir: PathBuf,
    pub jwt_secret: String,
    pub storage: Arc<StorageService>,
    pub scoring: Arc<ScoringService>,
    pub identity: Arc<IdentityService>,
}
