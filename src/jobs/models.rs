// src/jobs/models.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ============================================================================
// Job Models
// ============================================================================

#[derive(FromRow, Serialize, Deserialize, Debug, Clone)]
pub struct Job {
    pub id: String,
    pub recruiter_id: String,
    pub job_title: String,
    pub company_name: String,
    pub company_linkedin_url: Option<String>,
    pub workplace_type: String,
    pub job_location: String,
    pub employment_type: String,
    pub job_description: String,
    pub skills: Option<String>, // JSON string in DB, parsed for responses
    pub industry: String,
    pub job_function: String,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub salary_currency: Option<String>,
    pub status: String,
    pub expiry_date: Option<String>,
    pub applicants_count: i64,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

// Job response with the skills array parsed out of its JSON string
#[derive(Serialize, Debug)]
pub struct JobResponse {
    pub id: String,
    pub recruiter_id: String,
    pub job_title: String,
    pub company_name: String,
    pub company_linkedin_url: Option<String>,
    pub workplace_type: String,
    pub job_location: String,
    pub employment_type: String,
    pub job_description: String,
    pub skills: Vec<String>,
    pub industry: String,
    pub job_function: String,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub salary_currency: Option<String>,
    pub status: String,
    pub expiry_date: Option<String>,
    pub applicants_count: i64,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<Job> for JobResponse {
    fn from(job: Job) -> Self {
        let skills = job
            .skills
            .and_then(|s| serde_json::from_str::<Vec<String>>(&s).ok())
            .unwrap_or_default();

        JobResponse {
            id: job.id,
            recruiter_id: job.recruiter_id,
            job_title: job.job_title,
            company_name: job.company_name,
            company_linkedin_url: job.company_linkedin_url,
            workplace_type: job.workplace_type,
            job_location: job.job_location,
            employment_type: job.employment_type,
            job_description: job.job_description,
            skills,
            industry: job.industry,
            job_function: job.job_function,
            salary_min: job.salary_min,
            salary_max: job.salary_max,
            salary_currency: job.salary_currency,
            status: job.status,
            expiry_date: job.expiry_date,
            applicants_count: job.applicants_count,
            created_at: job.created_at,
            updated_at: job.updated_at,
        }
    }
}

// Missing string fields default to "" so the validator can report them as
// missing with a 400 rather than a deserialization rejection
#[derive(Debug, Deserialize)]
pub struct CreateJobRequest {
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub company_name: String,
    pub company_linkedin_url: Option<String>,
    #[serde(default)]
    pub workplace_type: String,
    #[serde(default)]
    pub job_location: String,
    #[serde(default)]
    pub employment_type: String,
    #[serde(default)]
    pub job_description: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub job_function: String,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub salary_currency: Option<String>,
    pub expiry_date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreatedJobResponse {
    pub success: bool,
    pub job: JobResponse,
}

#[derive(Debug, Serialize)]
pub struct JobListResponse {
    pub success: bool,
    pub jobs: Vec<JobResponse>,
}

#[derive(Debug, Serialize)]
pub struct DeleteJobResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct MyJobsQuery {
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PublicJobsQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicJobsResponse {
    pub jobs: Vec<JobResponse>,
    pub total: i64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
    pub has_more: bool,
}
