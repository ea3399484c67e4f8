// Scoring proxy - forwards ranking requests to the external scoring backend

use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::post,
    Router,
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};

use crate::auth::AuthedUser;
use crate::common::{ApiError, AppState};
use crate::services::ScoringError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRequest {
    #[serde(default)]
    pub job_id: String,
}

/// POST /api/score - Proxy a scoring run for a job's applications.
/// The backend's status and body are relayed untouched so the client sees
/// exactly what the scoring service said.
pub async fn score_job(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Json(request): Json<ScoreRequest>,
) -> Result<Response, ApiError> {
    let state = state_lock.read().await.clone();

    if request.job_id.trim().is_empty() {
        return Err(ApiError::BadRequest("Job ID is required".to_string()));
    }

    info!(user_id = %authed.id, job_id = %request.job_id, "Forwarding scoring request");

    let (status, body) = state.scoring.score_job(&request.job_id).await.map_err(|e| {
        error!(error = %e, job_id = %request.job_id, "Scoring request failed");
        match e {
            ScoringError::NotConfigured => {
                ApiError::InternalServer("Scoring backend is not configured".to_string())
            }
            ScoringError::Unreachable(_) => {
                ApiError::InternalServer("Scoring backend is unreachable".to_string())
            }
        }
    })?;

    let status =
        StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    Ok((status, Json::<Value>(body)).into_response())
}

pub fn score_routes() -> Router {
    Router::new().route("/api/score", post(score_job))
}
