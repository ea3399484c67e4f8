// src/services/identity.rs
//! Admin client for the hosted identity provider.
//!
//! Authentication itself happens via the provider's signed tokens (see
//! auth::extractors); this client only mirrors the write-once role choice
//! into the provider's user metadata so other consumers of the provider
//! see it too.

use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("identity provider not configured")]
    NotConfigured,

    #[error("identity provider request failed: {0}")]
    Request(String),

    #[error("identity provider returned status {0}")]
    Api(u16),
}

#[derive(Debug)]
pub struct IdentityService {
    base_url: Option<String>,
    api_key: Option<String>,
    http: reqwest::Client,
}

impl IdentityService {
    pub fn new(base_url: Option<String>, api_key: Option<String>, http: reqwest::Client) -> Self {
        Self {
            base_url,
            api_key,
            http,
        }
    }

    /// Write the role into the provider's public metadata for `user_id`.
    pub async fn set_role_metadata(&self, user_id: &str, role: &str) -> Result<(), IdentityError> {
        let base_url = self
            .base_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .ok_or(IdentityError::NotConfigured)?;
        let api_key = self
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(IdentityError::NotConfigured)?;

        let response = self
            .http
            .patch(format!(
                "{}/users/{}/metadata",
                base_url.trim_end_matches('/'),
                user_id
            ))
            .bearer_auth(api_key)
            .json(&json!({ "public_metadata": { "role": role } }))
            .send()
            .await
            .map_err(|e| IdentityError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(IdentityError::Api(response.status().as_u16()));
        }

        Ok(())
    }
}
