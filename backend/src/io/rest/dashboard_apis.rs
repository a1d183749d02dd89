//! # REST API for the Dashboard

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use tracing::info;

use crate::domain::commands::dashboard::DashboardQuery;
use crate::io::rest::error_response;
use crate::io::rest::mappers::DashboardMapper;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardParams {
    pub account_year: Option<String>,
    pub subdistrict: Option<String>,
}

/// Combined KPI and chart data for a year/subdistrict pair
pub async fn get_dashboard_overview(
    State(state): State<AppState>,
    Query(params): Query<DashboardParams>,
) -> impl IntoResponse {
    info!("GET /api/v1/protected/dashboard/overview - query: {:?}", params);

    let query = DashboardQuery {
        account_year: params.account_year,
        subdistrict: params.subdistrict,
    };

    match state.dashboard_service.overview(query).await {
        Ok(overview) => (StatusCode::OK, Json(DashboardMapper::to_dto(overview))).into_response(),
        Err(e) => error_response("Failed to build dashboard overview", e),
    }
}
