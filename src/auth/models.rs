// src/auth/models.rs

use serde::{Deserialize, Serialize};

/// Claims carried by identity-provider-issued tokens.
///
/// `sub` is the provider's stable user identifier; it is used directly as the
/// primary key of the users table.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    pub exp: usize,
}
