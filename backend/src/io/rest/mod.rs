//! # REST API Interface Layer
//!
//! HTTP endpoints for the cooperative backend. Handlers translate DTOs from
//! the `shared` crate into domain commands, call a service, and map the
//! result back. Domain errors become status codes here:
//!
//! | error | status |
//! |---|---|
//! | `InvalidInput` | 400 |
//! | `Unauthorized` | 401 |
//! | `NotFound` | 404 |
//! | `Conflict` | 409 |
//! | `StoreUnavailable`, `Internal` | 500 |
//!
//! Server-side failure details are logged and never sent to the client.

pub mod auth_apis;
pub mod career_apis;
pub mod dashboard_apis;
pub mod dropdown_apis;
pub mod mappers;
pub mod member_apis;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use shared::MessageResponse;
use tracing::{error, warn};

use crate::domain::DomainError;

pub fn status_for(e: &DomainError) -> StatusCode {
    match e {
        DomainError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        DomainError::NotFound(_) => StatusCode::NOT_FOUND,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::StoreUnavailable(_) | DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Log a failed operation and turn it into a `{ message }` response
pub fn error_response(context: &str, e: DomainError) -> Response {
    let status = status_for(&e);
    let message = if status.is_server_error() {
        error!("{}: {:#}", context, e);
        "Internal server error".to_string()
    } else {
        warn!("{}: {}", context, e);
        e.to_string()
    };

    (status, Json(MessageResponse::new(message))).into_response()
}
