//! Administrator accounts and session tokens.
//!
//! Passwords are stored as Argon2id PHC strings. Sessions are HS256 JWTs
//! carrying the admin id and username.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::commands::auth::{AuthSession, LoginAdminCommand, RegisterAdminCommand};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::admin::{Admin, TokenClaims};
use crate::domain::models::member::Member;
use crate::storage::AdminStorage;

const MIN_USERNAME_LENGTH: usize = 13;
const MIN_PASSWORD_LENGTH: usize = 5;

/// Longest session lifetime accepted, one year
pub const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365;

/// Hash a password using Argon2id
pub fn hash_password(password: &str) -> DomainResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| DomainError::Internal(format!("Failed to hash password: {e}")))
}

/// Verify a password against a stored PHC hash
pub fn verify_password(password: &str, hash: &str) -> DomainResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| DomainError::Internal(format!("Invalid password hash format: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Run Argon2 work on the blocking pool so it does not stall async workers.
async fn run_blocking<T, F>(task: F) -> DomainResult<T>
where
    F: FnOnce() -> DomainResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| DomainError::Internal(format!("Password task failed: {e}")))?
}

#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn AdminStorage>,
    jwt_secret: Arc<str>,
    token_ttl: Duration,
}

impl AuthService {
    /// `token_ttl_hours` is clamped to `±MAX_TOKEN_TTL_HOURS`.
    pub fn new(store: Arc<dyn AdminStorage>, jwt_secret: &str, token_ttl_hours: i64) -> Self {
        let token_ttl_hours = token_ttl_hours.clamp(-MAX_TOKEN_TTL_HOURS, MAX_TOKEN_TTL_HOURS);
        Self {
            store,
            jwt_secret: Arc::from(jwt_secret),
            token_ttl: Duration::hours(token_ttl_hours),
        }
    }

    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }

    pub async fn register_admin(&self, command: RegisterAdminCommand) -> DomainResult<AuthSession> {
        info!("Registering admin: {}", command.username);

        if command.username.is_empty() || command.password.is_empty() || command.full_name.trim().is_empty() {
            return Err(DomainError::invalid("Username, password and full name are required"));
        }
        if command.username.chars().count() < MIN_USERNAME_LENGTH {
            return Err(DomainError::invalid("Username must be at least 13 characters"));
        }
        if command.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(DomainError::invalid("Password must be at least 5 characters"));
        }

        if self.store.find_by_username(&command.username).await?.is_some() {
            warn!("Rejected registration: username {} taken", command.username);
            return Err(DomainError::conflict("Username already exists"));
        }
        let compact_name = Member::compact_name(&command.full_name);
        if self.store.find_by_compact_full_name(&compact_name).await?.is_some() {
            warn!("Rejected registration: full name {} taken", command.full_name);
            return Err(DomainError::conflict("Full name already exists"));
        }

        let password = command.password;
        let password_hash = run_blocking(move || hash_password(&password)).await?;

        let now = Utc::now();
        let admin = Admin {
            id: Uuid::new_v4(),
            username: command.username,
            password_hash,
            full_name: command.full_name,
            created_at: now,
            updated_at: now,
        };
        self.store.insert_admin(&admin).await?;

        let token = self.issue_token(&admin)?;
        info!("Registered admin {} with ID: {}", admin.username, admin.id);

        Ok(AuthSession { admin, token })
    }

    pub async fn login_admin(&self, command: LoginAdminCommand) -> DomainResult<AuthSession> {
        info!("Admin login: {}", command.username);

        if command.username.is_empty() || command.password.is_empty() {
            return Err(DomainError::invalid("Username and password are required"));
        }

        let admin = self.store.find_by_username(&command.username).await?.ok_or_else(|| {
            warn!("Login for unknown admin {}", command.username);
            DomainError::not_found("Admin not found")
        })?;

        let password = command.password;
        let password_hash = admin.password_hash.clone();
        if !run_blocking(move || verify_password(&password, &password_hash)).await? {
            warn!("Wrong password for admin {}", admin.username);
            return Err(DomainError::Unauthorized("Invalid username or password".to_string()));
        }

        let token = self.issue_token(&admin)?;
        Ok(AuthSession { admin, token })
    }

    /// Sign a session token for `admin`
    pub fn issue_token(&self, admin: &Admin) -> DomainResult<String> {
        let now = Utc::now();
        let claims = TokenClaims {
            sub: admin.id.to_string(),
            username: admin.username.clone(),
            iat: now.timestamp() as usize,
            exp: (now + self.token_ttl).timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| DomainError::Internal(format!("Failed to encode session token: {e}")))
    }

    /// Validate a session token and extract its claims
    pub fn validate_token(&self, token: &str) -> DomainResult<TokenClaims> {
        decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| {
            warn!("Rejected session token: {}", e);
            DomainError::Unauthorized("Invalid or expired session".to_string())
        })
    }

    /// The admin a validated token belongs to
    pub async fn current_admin(&self, claims: &TokenClaims) -> DomainResult<Admin> {
        let id = Uuid::parse_str(&claims.sub)
            .map_err(|_| DomainError::Unauthorized("Invalid session subject".to_string()))?;

        self.store
            .get_admin(id)
            .await?
            .ok_or_else(|| DomainError::Unauthorized("Admin no longer exists".to_string()))
    }
}
