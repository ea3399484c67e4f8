// src/applications/models.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(FromRow, Serialize, Deserialize, Debug, Clone)]
pub struct Application {
    pub id: String,
    pub job_id: String,
    pub candidate_id: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub education_level: Option<String>,
    pub years_of_experience: Option<f64>,
    pub cover_letter: Option<String>,
    pub resume_url: String,
    pub resume_text: Option<String>,
    pub status: String,
    pub rejection_feedback: Option<String>,
    pub created_at: Option<String>,
}

/// Recruiter-facing listing row: application plus its externally computed
/// score, if the scoring backend has produced one
#[derive(FromRow, Serialize, Debug)]
pub struct ApplicationWithScore {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub application: Application,
    pub score: Option<f64>,
}

/// Applicant-supplied form fields from the multipart submission
#[derive(Debug, Default, Clone)]
pub struct ApplicantDetails {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub education_level: Option<String>,
    pub years_of_experience: Option<f64>,
    pub cover_letter: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApplicationQuery {
    #[serde(rename = "jobId")]
    pub job_id: Option<String>,
    pub check: Option<String>,
}

#[derive(FromRow, Serialize, Debug)]
pub struct ApplicationStatusSummary {
    pub id: String,
    pub status: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResponse {
    pub has_applied: bool,
    pub application: Option<ApplicationStatusSummary>,
}

#[derive(Debug, Serialize)]
pub struct ApplicationsResponse {
    pub applications: Vec<ApplicationWithScore>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateApplicationRequest {
    #[serde(default)]
    pub application_id: String,
    #[serde(default)]
    pub status: String,
    pub feedback: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ApplicationResponse {
    pub success: bool,
    pub application: Application,
}
