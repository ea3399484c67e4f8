// src/users/models.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User row, keyed by the identity provider's subject.
/// `role` is NULL until the user picks one; after that it is write-once.
#[derive(FromRow, Serialize, Deserialize, Debug, Clone)]
pub struct User {
    pub id: String,
    pub email: String,
    pub role: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SetRoleRequest {
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Serialize)]
pub struct SetRoleResponse {
    pub role: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct UserCheckResponse {
    pub exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

pub fn is_valid_role(role: &str) -> bool {
    matches!(role, "candidate" | "recruiter")
}
