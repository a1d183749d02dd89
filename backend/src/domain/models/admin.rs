use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct Admin {
    pub id: Uuid,
    pub username: String,
    /// Argon2 PHC string, never exposed over the API
    pub password_hash: String,
    pub full_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Claims carried by a session token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Admin id
    pub sub: String,
    pub username: String,
    pub iat: usize,
    pub exp: usize,
}
