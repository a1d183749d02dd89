use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use shared::MessageResponse;
use tracing::warn;

use crate::domain::models::admin::TokenClaims;
use crate::io::session::session_token;
use crate::AppState;

fn unauthorized(message: &str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(MessageResponse::new(message))).into_response()
}

/// Middleware that requires a valid session token
pub async fn require_auth(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let Some(token) = session_token(req.headers()) else {
        warn!("Rejected {} {}: no session", req.method(), req.uri().path());
        return unauthorized("Unauthorized");
    };

    match state.auth_service.validate_token(&token) {
        Ok(claims) => {
            // Add claims to request extensions for use in handlers
            req.extensions_mut().insert(claims);
            next.run(req).await
        }
        Err(_) => unauthorized("Invalid or expired session"),
    }
}

/// Extractor for the claims of the authenticated admin.
/// Usage in handlers: `async fn handler(CurrentAdmin(claims): CurrentAdmin) -> Response`
pub struct CurrentAdmin(pub TokenClaims);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentAdmin
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Set by require_auth
        parts
            .extensions
            .get::<TokenClaims>()
            .cloned()
            .map(CurrentAdmin)
            .ok_or_else(|| unauthorized("Unauthorized"))
    }
}
