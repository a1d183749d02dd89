//! # REST API for Admin Authentication
//!
//! Register and login set the `jwt` session cookie; logout expires it.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use shared::{AdminProfile, DataResponse, LoginAdminRequest, MessageResponse, RegisterAdminRequest};
use tracing::info;

use crate::domain::commands::auth::{AuthSession, LoginAdminCommand, RegisterAdminCommand};
use crate::domain::models::admin::Admin;
use crate::io::middleware::CurrentAdmin;
use crate::io::rest::error_response;
use crate::io::session::{expired_session_cookie, session_cookie};
use crate::AppState;

fn to_profile(admin: Admin) -> AdminProfile {
    AdminProfile {
        id: admin.id.to_string(),
        username: admin.username,
        full_name: admin.full_name,
    }
}

fn session_response(state: &AppState, status: StatusCode, message: &str, session: AuthSession) -> Response {
    let max_age = state.auth_service.token_ttl().num_seconds();
    let cookie = session_cookie(&session.token, max_age, state.secure_cookies);

    (
        status,
        [(header::SET_COOKIE, cookie)],
        Json(DataResponse::new(message, to_profile(session.admin))),
    )
        .into_response()
}

pub async fn register_admin(
    State(state): State<AppState>,
    Json(request): Json<RegisterAdminRequest>,
) -> impl IntoResponse {
    info!("POST /api/v1/auth/register-admin - username: {}", request.username);

    let command = RegisterAdminCommand {
        username: request.username,
        password: request.password,
        full_name: request.full_name,
    };

    match state.auth_service.register_admin(command).await {
        Ok(session) => session_response(&state, StatusCode::CREATED, "Admin registered successfully", session),
        Err(e) => error_response("Failed to register admin", e),
    }
}

pub async fn login_admin(
    State(state): State<AppState>,
    Json(request): Json<LoginAdminRequest>,
) -> impl IntoResponse {
    info!("POST /api/v1/auth/login-admin - username: {}", request.username);

    let command = LoginAdminCommand {
        username: request.username,
        password: request.password,
    };

    match state.auth_service.login_admin(command).await {
        Ok(session) => session_response(&state, StatusCode::OK, "Login successful", session),
        Err(e) => error_response("Failed to log in admin", e),
    }
}

pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    info!("POST /api/v1/protected/logout");

    (
        StatusCode::OK,
        [(header::SET_COOKIE, expired_session_cookie(state.secure_cookies))],
        Json(MessageResponse::new("Logout successful")),
    )
}

pub async fn me(State(state): State<AppState>, CurrentAdmin(claims): CurrentAdmin) -> impl IntoResponse {
    info!("GET /api/v1/protected/me - admin: {}", claims.username);

    match state.auth_service.current_admin(&claims).await {
        Ok(admin) => (
            StatusCode::OK,
            Json(DataResponse::new("Admin retrieved successfully", to_profile(admin))),
        )
            .into_response(),
        Err(e) => error_response("Failed to load current admin", e),
    }
}
