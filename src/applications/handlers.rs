// src/applications/handlers.rs

use axum::{
    extract::{Extension, Multipart, Path, Query},
    http::header,
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};

use super::extract::extract_resume_text;
use super::models::*;
use crate::auth::AuthedUser;
use crate::common::{generate_application_id, ApiError, AppState};
use crate::services::storage::content_type_for;

/// POST /api/application - Submit an application (multipart with resume)
pub async fn submit_application(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    mut multipart: Multipart,
) -> Result<Json<ApplicationResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    let mut job_id: Option<String> = None;
    let mut resume: Option<(String, Vec<u8>)> = None;
    let mut details = ApplicantDetails::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::BadRequest("Invalid multipart payload".to_string()))?
    {
        let name = field.name().map(|n| n.to_string());
        match name.as_deref() {
            Some("jobId") => job_id = field.text().await.ok(),
            Some("name") => details.full_name = field.text().await.ok(),
            Some("email") => details.email = field.text().await.ok(),
            Some("phoneNumber") => details.phone = field.text().await.ok(),
            Some("educationLevel") => details.education_level = field.text().await.ok(),
            Some("yearsOfExperience") => {
                details.years_of_experience =
                    field.text().await.ok().and_then(|v| v.parse::<f64>().ok())
            }
            Some("coverLetter") => details.cover_letter = field.text().await.ok(),
            Some("resume") => {
                let filename = field.file_name().unwrap_or("resume.pdf").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|_| ApiError::BadRequest("Invalid file".to_string()))?;
                resume = Some((filename, data.to_vec()));
            }
            _ => {}
        }
    }

    let job_id = job_id.filter(|id| !id.trim().is_empty());
    let (job_id, (filename, data)) = match (job_id, resume) {
        (Some(job_id), Some(resume)) => (job_id, resume),
        _ => return Err(ApiError::BadRequest("Missing required fields".to_string())),
    };

    info!(user_id = %authed.id, job_id = %job_id, "Submitting application");

    let job_exists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM jobs WHERE id = ?")
        .bind(&job_id)
        .fetch_one(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;
    if job_exists == 0 {
        return Err(ApiError::NotFound("Job not found".to_string()));
    }

    // The unique index on (job_id, candidate_id) is the authoritative guard;
    // this pre-check keeps a duplicate submission from leaving an orphaned
    // resume in blob storage
    let already_applied: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM applications WHERE job_id = ? AND candidate_id = ?",
    )
    .bind(&job_id)
    .bind(&authed.id)
    .fetch_one(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;
    if already_applied > 0 {
        return Err(ApiError::Conflict(
            "You have already applied for this job".to_string(),
        ));
    }

    // Extraction failure never blocks submission
    let resume_text = extract_resume_text(&filename, &data);

    // Timestamped filename avoids collisions without content addressing
    let extension = std::path::Path::new(&filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_else(|| "bin".to_string());
    let key = format!(
        "{}/{}-{}.{}",
        job_id,
        authed.id,
        Utc::now().timestamp_millis(),
        extension
    );

    let resume_url = state
        .storage
        .upload(data, &key, content_type_for(&extension))
        .await
        .map_err(|e| {
            error!(error = %e, user_id = %authed.id, job_id = %job_id, "Resume upload failed");
            ApiError::UploadFailed("Failed to upload resume".to_string())
        })?;

    let application =
        persist_application(&state.db, &job_id, &authed.id, &details, &resume_url, &resume_text)
            .await?;

    info!(
        user_id = %authed.id,
        application_id = %application.id,
        job_id = %job_id,
        "Application created"
    );

    Ok(Json(ApplicationResponse {
        success: true,
        application,
    }))
}

/// Insert the application and bump the job's applicant counter in one
/// transaction. The unique index on (job_id, candidate_id) is what enforces
/// the one-application-per-job rule; a violation maps to Conflict.
pub(crate) async fn persist_application(
    db: &SqlitePool,
    job_id: &str,
    candidate_id: &str,
    details: &ApplicantDetails,
    resume_url: &str,
    resume_text: &str,
) -> Result<Application, ApiError> {
    let application_id = generate_application_id();
    let now = Utc::now().to_rfc3339();

    let mut tx = db.begin().await.map_err(ApiError::DatabaseError)?;

    let insert = sqlx::query(
        r#"
        INSERT INTO applications (
            id, job_id, candidate_id, full_name, email, phone,
            education_level, years_of_experience, cover_letter,
            resume_url, resume_text, status, created_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 'pending', ?)
        "#,
    )
    .bind(&application_id)
    .bind(job_id)
    .bind(candidate_id)
    .bind(details.full_name.as_deref())
    .bind(details.email.as_deref())
    .bind(details.phone.as_deref())
    .bind(details.education_level.as_deref())
    .bind(details.years_of_experience)
    .bind(details.cover_letter.as_deref())
    .bind(resume_url)
    .bind(resume_text)
    .bind(&now)
    .execute(&mut *tx)
    .await;

    if let Err(e) = insert {
        if let sqlx::Error::Database(db_err) = &e {
            if matches!(db_err.kind(), sqlx::error::ErrorKind::UniqueViolation) {
                return Err(ApiError::Conflict(
                    "You have already applied for this job".to_string(),
                ));
            }
        }
        return Err(ApiError::DatabaseError(e));
    }

    // Counter moves with the insert or not at all
    sqlx::query("UPDATE jobs SET applicants_count = applicants_count + 1, updated_at = ? WHERE id = ?")
        .bind(&now)
        .bind(job_id)
        .execute(&mut *tx)
        .await
        .map_err(ApiError::DatabaseError)?;

    tx.commit().await.map_err(ApiError::DatabaseError)?;

    let application = sqlx::query_as::<_, Application>("SELECT * FROM applications WHERE id = ?")
        .bind(&application_id)
        .fetch_one(db)
        .await
        .map_err(ApiError::DatabaseError)?;

    Ok(application)
}

/// GET /api/application?jobId=&check= - Candidate existence check, or the
/// recruiter-facing listing with joined scores.
///
/// The listing deliberately has no ownership filter: any authenticated
/// caller may list a job's applications. Matches the current product
/// behavior; pending a product decision before hardening.
pub async fn get_applications(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Query(params): Query<ApplicationQuery>,
) -> Result<Response, ApiError> {
    let state = state_lock.read().await.clone();

    let job_id = params
        .job_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Job ID is required".to_string()))?;

    if params.check.as_deref() == Some("true") {
        let application = sqlx::query_as::<_, ApplicationStatusSummary>(
            "SELECT id, status FROM applications WHERE job_id = ? AND candidate_id = ?",
        )
        .bind(&job_id)
        .bind(&authed.id)
        .fetch_optional(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        return Ok(Json(CheckResponse {
            has_applied: application.is_some(),
            application,
        })
        .into_response());
    }

    let applications = sqlx::query_as::<_, ApplicationWithScore>(
        r#"
        SELECT a.*, s.score AS score
        FROM applications a
        LEFT JOIN scores s ON s.application_id = a.id
        WHERE a.job_id = ?
        ORDER BY a.created_at DESC
        "#,
    )
    .bind(&job_id)
    .fetch_all(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    Ok(Json(ApplicationsResponse { applications }).into_response())
}

/// Both targets are terminal: once shortlisted or rejected, an application
/// does not move again.
pub(crate) fn validate_status_transition(current: &str, requested: &str) -> Result<(), ApiError> {
    if !matches!(requested, "shortlisted" | "rejected") {
        return Err(ApiError::BadRequest(
            "Invalid status. Must be shortlisted or rejected".to_string(),
        ));
    }
    if current != "pending" {
        return Err(ApiError::Conflict(
            "Application has already been reviewed".to_string(),
        ));
    }
    Ok(())
}

/// PATCH /api/application - Review an application (owning recruiter only)
pub async fn update_application_status(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Json(request): Json<UpdateApplicationRequest>,
) -> Result<Json<ApplicationResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    if request.application_id.trim().is_empty() || request.status.trim().is_empty() {
        return Err(ApiError::BadRequest("Missing required fields".to_string()));
    }

    let existing =
        sqlx::query_as::<_, Application>("SELECT * FROM applications WHERE id = ?")
            .bind(&request.application_id)
            .fetch_optional(&state.db)
            .await
            .map_err(ApiError::DatabaseError)?
            .ok_or_else(|| ApiError::NotFound("Application not found".to_string()))?;

    // Only the recruiter who owns the parent job may review
    let recruiter_id: Option<String> =
        sqlx::query_scalar("SELECT recruiter_id FROM jobs WHERE id = ?")
            .bind(&existing.job_id)
            .fetch_optional(&state.db)
            .await
            .map_err(ApiError::DatabaseError)?;
    let recruiter_id = recruiter_id.ok_or_else(|| ApiError::NotFound("Job not found".to_string()))?;

    if recruiter_id != authed.id {
        return Err(ApiError::Forbidden("Forbidden".to_string()));
    }

    validate_status_transition(&existing.status, &request.status)?;

    info!(
        application_id = %existing.id,
        old_status = %existing.status,
        new_status = %request.status,
        changed_by = %authed.id,
        "Updating application status"
    );

    let feedback = request.feedback.as_deref().filter(|f| !f.trim().is_empty());
    if request.status == "rejected" && feedback.is_some() {
        sqlx::query("UPDATE applications SET status = ?, rejection_feedback = ? WHERE id = ?")
            .bind(&request.status)
            .bind(feedback)
            .bind(&existing.id)
            .execute(&state.db)
            .await
            .map_err(ApiError::DatabaseError)?;
    } else {
        sqlx::query("UPDATE applications SET status = ? WHERE id = ?")
            .bind(&request.status)
            .bind(&existing.id)
            .execute(&state.db)
            .await
            .map_err(ApiError::DatabaseError)?;
    }

    let application = sqlx::query_as::<_, Application>("SELECT * FROM applications WHERE id = ?")
        .bind(&existing.id)
        .fetch_one(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    Ok(Json(ApplicationResponse {
        success: true,
        application,
    }))
}

/// GET /api/resumes/*key - Serve a locally stored resume file.
/// Only meaningful when local storage is configured; S3 URLs bypass this.
pub async fn serve_resume(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Path(key): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    if key.contains("..") {
        return Err(ApiError::BadRequest("Invalid resume path".to_string()));
    }

    let state = state_lock.read().await.clone();
    let path = state.resumes_dir.join(&key);

    let data = tokio::fs::read(&path)
        .await
        .map_err(|_| ApiError::NotFound("Resume not found".to_string()))?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    Ok(([(header::CONTENT_TYPE, content_type_for(&extension))], data))
}
