// src/jobs/handlers.rs

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::Json,
};
use chrono::{Duration, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};

use crate::auth::AuthedUser;
use crate::common::retry::{with_retry, RetryPolicy};
use crate::common::{generate_job_id, ApiError, AppState, Validator};
use crate::jobs::models::*;
use crate::jobs::validators::JobValidator;
use crate::users::require_recruiter;

/// POST /api/jobs - Create a job posting (recruiter only)
pub async fn create_job(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Json(request): Json<CreateJobRequest>,
) -> Result<(StatusCode, Json<CreatedJobResponse>), ApiError> {
    let state = state_lock.read().await.clone();

    let recruiter =
        require_recruiter(&state.db, &authed.id, "Only recruiters can post jobs").await?;

    let validation_result = JobValidator.validate(&request);
    if !validation_result.is_valid {
        return Err(ApiError::from(validation_result));
    }

    // Postings default to a 30-day lifetime when no expiry is given
    let expiry_date = match &request.expiry_date {
        Some(raw) => chrono::DateTime::parse_from_rfc3339(raw)
            .map_err(|_| ApiError::BadRequest("Invalid expiry_date format".to_string()))?
            .with_timezone(&Utc)
            .to_rfc3339(),
        None => (Utc::now() + Duration::days(30)).to_rfc3339(),
    };

    let job_id = generate_job_id();
    let skills_json = serde_json::to_string(&request.skills)
        .map_err(|_| ApiError::InternalServer("Failed to encode skills".to_string()))?;
    let now = Utc::now().to_rfc3339();

    sqlx::query(
        r#"
        INSERT INTO jobs (
            id, recruiter_id, job_title, company_name, company_linkedin_url,
            workplace_type, job_location, employment_type, job_description,
            skills, industry, job_function, salary_min, salary_max,
            salary_currency, status, expiry_date, applicants_count,
            created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 'active', ?, 0, ?, ?)
        "#,
    )
    .bind(&job_id)
    .bind(&recruiter.id)
    .bind(&request.job_title)
    .bind(&request.company_name)
    .bind(request.company_linkedin_url.as_deref())
    .bind(&request.workplace_type)
    .bind(&request.job_location)
    .bind(&request.employment_type)
    .bind(&request.job_description)
    .bind(&skills_json)
    .bind(&request.industry)
    .bind(&request.job_function)
    .bind(request.salary_min)
    .bind(request.salary_max)
    .bind(request.salary_currency.as_deref().unwrap_or("USD"))
    .bind(&expiry_date)
    .bind(&now)
    .bind(&now)
    .execute(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    let job = sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE id = ?")
        .bind(&job_id)
        .fetch_one(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    info!(
        recruiter_id = %recruiter.id,
        job_id = %job_id,
        "Job created"
    );

    Ok((
        StatusCode::CREATED,
        Json(CreatedJobResponse {
            success: true,
            job: job.into(),
        }),
    ))
}

/// GET /api/jobs - List all active jobs (any authenticated user)
pub async fn list_active_jobs(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    _authed: AuthedUser,
) -> Result<Json<JobListResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    let jobs = sqlx::query_as::<_, Job>(
        "SELECT * FROM jobs WHERE status = 'active' ORDER BY created_at DESC",
    )
    .fetch_all(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    Ok(Json(JobListResponse {
        success: true,
        jobs: jobs.into_iter().map(Into::into).collect(),
    }))
}

/// GET /api/jobs/my-jobs - List the caller's own postings (recruiter only)
pub async fn my_jobs(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Query(params): Query<MyJobsQuery>,
) -> Result<Json<JobListResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    let recruiter =
        require_recruiter(&state.db, &authed.id, "Only recruiters can view their jobs").await?;

    // Unknown status values are ignored rather than rejected
    let jobs = match params.status.as_deref() {
        Some(status @ ("active" | "closed")) => sqlx::query_as::<_, Job>(
            "SELECT * FROM jobs WHERE recruiter_id = ? AND status = ? ORDER BY created_at DESC",
        )
        .bind(&recruiter.id)
        .bind(status)
        .fetch_all(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?,
        _ => sqlx::query_as::<_, Job>(
            "SELECT * FROM jobs WHERE recruiter_id = ? ORDER BY created_at DESC",
        )
        .bind(&recruiter.id)
        .fetch_all(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?,
    };

    Ok(Json(JobListResponse {
        success: true,
        jobs: jobs.into_iter().map(Into::into).collect(),
    }))
}

/// DELETE /api/jobs/:id - Delete a posting (owning recruiter only)
pub async fn delete_job(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Path(job_id): Path<String>,
) -> Result<Json<DeleteJobResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    let recruiter =
        require_recruiter(&state.db, &authed.id, "Only recruiters can delete jobs").await?;

    let job = sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE id = ?")
        .bind(&job_id)
        .fetch_optional(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound("Job not found".to_string()))?;

    if job.recruiter_id != recruiter.id {
        return Err(ApiError::Forbidden(
            "You do not have permission to delete this job".to_string(),
        ));
    }

    sqlx::query("DELETE FROM jobs WHERE id = ?")
        .bind(&job_id)
        .execute(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    info!(recruiter_id = %recruiter.id, job_id = %job_id, "Job deleted");

    Ok(Json(DeleteJobResponse {
        success: true,
        message: "Job deleted successfully".to_string(),
    }))
}

/// Clamp pagination inputs: page >= 1, limit in 1..=50 (default 12)
pub(crate) fn page_window(page: Option<u32>, limit: Option<u32>) -> (u32, u32) {
    let page = page.unwrap_or(1).max(1);
    let limit = limit.unwrap_or(12).clamp(1, 50);
    (page, limit)
}

/// GET /api/jobs/public - Paginated public listing of active jobs (no auth)
pub async fn public_jobs(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Query(params): Query<PublicJobsQuery>,
) -> Result<Json<PublicJobsResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    let (page, limit) = page_window(params.page, params.limit);
    // Widen before multiplying: page is caller-controlled and u32 arithmetic
    // would overflow at large page numbers
    let offset = (page as i64 - 1) * limit as i64;

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM jobs WHERE status = 'active'")
        .fetch_one(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    let jobs = sqlx::query_as::<_, Job>(
        r#"
        SELECT * FROM jobs
        WHERE status = 'active'
        ORDER BY created_at DESC
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(limit as i64)
    .bind(offset)
    .fetch_all(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    let total_pages = ((total + limit as i64 - 1) / limit as i64) as u32;

    Ok(Json(PublicJobsResponse {
        jobs: jobs.into_iter().map(Into::into).collect(),
        total,
        page,
        limit,
        total_pages,
        has_more: page < total_pages,
    }))
}

/// GET /api/jobs/public/:id - Public job detail (no auth), with bounded
/// retry around the read since this is the page the outside world hits
pub async fn public_job_detail(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Path(job_id): Path<String>,
) -> Result<Json<JobResponse>, ApiError> {
    if job_id.trim().is_empty() {
        return Err(ApiError::BadRequest("Valid Job ID is required".to_string()));
    }

    let state = state_lock.read().await.clone();

    let job = with_retry(RetryPolicy::default(), || {
        let db = state.db.clone();
        let id = job_id.clone();
        async move {
            sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE id = ?")
                .bind(&id)
                .fetch_optional(&db)
                .await
        }
    })
    .await
    .map_err(|e| {
        error!(job_id = %job_id, error = %e, "Failed to fetch job");
        ApiError::DatabaseError(e)
    })?;

    match job {
        Some(job) => Ok(Json(job.into())),
        None => Err(ApiError::NotFound("Job not found".to_string())),
    }
}
