// src/services/scoring.rs
//! Thin client for the external resume-scoring backend.
//!
//! The backend computes and persists one score per application for a job.
//! Responses are passed through to the caller as-is; no retry, no timeout
//! override.

use serde_json::{json, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("scoring backend not configured")]
    NotConfigured,

    #[error("scoring backend unreachable: {0}")]
    Unreachable(String),
}

#[derive(Debug)]
pub struct ScoringService {
    base_url: Option<String>,
    api_key: Option<String>,
    http: reqwest::Client,
}

impl ScoringService {
    pub fn new(base_url: Option<String>, api_key: Option<String>, http: reqwest::Client) -> Self {
        Self {
            base_url,
            api_key,
            http,
        }
    }

    /// Ask the backend to score every application for `job_id`.
    /// Returns the backend's status code and JSON body unmodified.
    pub async fn score_job(&self, job_id: &str) -> Result<(u16, Value), ScoringError> {
        let base_url = self
            .base_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .ok_or(ScoringError::NotConfigured)?;
        let api_key = self
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(ScoringError::NotConfigured)?;

        let response = self
            .http
            .post(format!("{}/score", base_url.trim_end_matches('/')))
            .header("X-API-Key", api_key)
            .json(&json!({ "job_id": job_id }))
            .send()
            .await
            .map_err(|e| ScoringError::Unreachable(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .json::<Value>()
            .await
            .unwrap_or_else(|_| json!({ "error": "Invalid response from scoring backend" }));

        Ok((status, body))
    }
}
