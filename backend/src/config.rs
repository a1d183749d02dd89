//! Runtime configuration
//!
//! CLI arguments with environment variable fallbacks. `main` loads `.env`
//! before parsing.

use clap::Parser;
use std::net::SocketAddr;

use crate::domain::auth_service::MAX_TOKEN_TTL_HOURS;

pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Cooperative membership backend
#[derive(Parser, Debug, Clone)]
#[command(name = "coop-backend")]
#[command(about = "Cooperative membership records and dashboard statistics API")]
pub struct Config {
    /// sqlx SQLite connection URL
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite:coop.db")]
    pub database_url: String,

    /// Address to listen on
    #[arg(long, env = "LISTEN", default_value = "127.0.0.1:8080")]
    pub listen: SocketAddr,

    /// HS256 signing secret for session tokens
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,

    /// Session token lifetime in hours
    #[arg(long, env = "TOKEN_TTL_HOURS", default_value = "24")]
    pub token_ttl_hours: i64,

    /// Origin allowed to make credentialed cross-origin requests
    #[arg(long, env = "FRONTEND_URL", default_value = "http://localhost:5173")]
    pub frontend_url: String,

    /// Per-request deadline in seconds
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value = "30")]
    pub request_timeout_secs: u64,

    /// Mark the session cookie `Secure`
    #[arg(long, env = "SECURE_COOKIES", default_value = "false")]
    pub secure_cookies: bool,
}

impl Config {
    pub fn validate(&self) -> Result<(), String> {
        if self.jwt_secret.chars().count() < MIN_JWT_SECRET_LENGTH {
            return Err(format!("JWT_SECRET must be at least {} characters", MIN_JWT_SECRET_LENGTH));
        }
        if self.token_ttl_hours <= 0 {
            return Err("TOKEN_TTL_HOURS must be positive".to_string());
        }
        if self.token_ttl_hours > MAX_TOKEN_TTL_HOURS {
            return Err(format!("TOKEN_TTL_HOURS must be at most {}", MAX_TOKEN_TTL_HOURS));
        }
        if self.request_timeout_secs == 0 {
            return Err("REQUEST_TIMEOUT_SECS must be positive".to_string());
        }
        Ok(())
    }
}
