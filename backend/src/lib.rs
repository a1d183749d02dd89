//! # Cooperative Backend
//!
//! Member records, career reference data and dashboard statistics for a
//! cooperative, served over a JSON REST API.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (REST handlers, auth middleware)
//!     ↓
//! Domain Layer (services, dashboard builders)
//!     ↓
//! Storage Layer (SQLite repositories behind traits)
//! ```
//!
//! `initialize_backend` wires the layers together into an [`AppState`] and
//! `create_router` exposes it under `/api/v1`.

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    middleware,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use shared::MessageResponse;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::domain::{AuthService, CareerService, DashboardService, DropdownService, MemberService};
use crate::io::middleware::require_auth;
use crate::io::rest::{auth_apis, career_apis, dashboard_apis, dropdown_apis, member_apis};
use crate::storage::{AdminRepository, CareerRepository, DbConnection, MemberRepository, MemberStorage};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub member_service: MemberService,
    pub dashboard_service: DashboardService,
    pub career_service: CareerService,
    pub auth_service: AuthService,
    pub dropdown_service: DropdownService,
    pub secure_cookies: bool,
    pub frontend_origin: HeaderValue,
    pub request_timeout: Duration,
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &Config) -> Result<AppState> {
    info!("Setting up database");
    let db = DbConnection::new(&config.database_url).await?;

    build_app_state(db, config)
}

/// Wire services on top of an existing connection
pub fn build_app_state(db: DbConnection, config: &Config) -> Result<AppState> {
    info!("Setting up domain model");
    let members: Arc<dyn MemberStorage> = Arc::new(MemberRepository::new(db.clone()));

    let frontend_origin = config
        .frontend_url
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid FRONTEND_URL '{}'", config.frontend_url))?;

    Ok(AppState {
        member_service: MemberService::new(members.clone()),
        dashboard_service: DashboardService::new(members.clone()),
        dropdown_service: DropdownService::new(members),
        career_service: CareerService::new(Arc::new(CareerRepository::new(db.clone()))),
        auth_service: AuthService::new(
            Arc::new(AdminRepository::new(db)),
            &config.jwt_secret,
            config.token_ttl_hours,
        ),
        secure_cookies: config.secure_cookies,
        frontend_origin,
        request_timeout: Duration::from_secs(config.request_timeout_secs),
    })
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(MessageResponse::new("OK")))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    // CORS setup to allow the frontend to make credentialed requests
    let cors = CorsLayer::new()
        .allow_origin(app_state.frontend_origin.clone())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true);

    let protected_routes = Router::new()
        .route("/logout", post(auth_apis::logout))
        .route("/me", get(auth_apis::me))
        .route("/dashboard/overview", get(dashboard_apis::get_dashboard_overview))
        .route("/members", get(member_apis::list_members).post(member_apis::create_member))
        .route(
            "/members/:id",
            get(member_apis::get_member)
                .put(member_apis::update_member)
                .delete(member_apis::delete_member),
        )
        .route(
            "/career/categories",
            get(career_apis::list_categories).post(career_apis::create_category),
        )
        .route(
            "/career/categories/:id",
            get(career_apis::get_category)
                .put(career_apis::update_category)
                .delete(career_apis::delete_category),
        )
        .route(
            "/career/categories/:id/subcategories",
            get(career_apis::list_sub_categories_by_category),
        )
        .route(
            "/career/subcategories",
            get(career_apis::list_sub_categories).post(career_apis::create_sub_category),
        )
        .route(
            "/career/subcategories/:id",
            get(career_apis::get_sub_category)
                .put(career_apis::update_sub_category)
                .delete(career_apis::delete_sub_category),
        )
        .route("/dropdown/full", get(dropdown_apis::get_full_dropdown))
        .route("/dropdown/subdistricts", get(dropdown_apis::get_subdistricts))
        .route("/dropdown/districts", get(dropdown_apis::get_districts))
        .route("/dropdown/provinces", get(dropdown_apis::get_provinces))
        .route_layer(middleware::from_fn_with_state(app_state.clone(), require_auth));

    let api_routes = Router::new()
        .route("/auth/register-admin", post(auth_apis::register_admin))
        .route("/auth/login-admin", post(auth_apis::login_admin))
        .nest("/protected", protected_routes);

    let request_timeout = app_state.request_timeout;

    // Define our main application router
    Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api_routes)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}
