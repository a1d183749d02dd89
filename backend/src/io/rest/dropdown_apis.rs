//! # REST API for Location Dropdowns

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use shared::{DataResponse, FullDropdown};
use tracing::info;

use crate::domain::models::member::LocationField;
use crate::io::rest::error_response;
use crate::AppState;

pub async fn get_full_dropdown(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/v1/protected/dropdown/full");

    match state.dropdown_service.full().await {
        Ok(options) => {
            let data = FullDropdown {
                sub_districts: options.subdistricts,
                districts: options.districts,
                provinces: options.provinces,
            };
            (StatusCode::OK, Json(DataResponse::new("Dropdown data retrieved successfully", data))).into_response()
        }
        Err(e) => error_response("Failed to load dropdown data", e),
    }
}

async fn values_response(state: AppState, field: LocationField) -> Response {
    match state.dropdown_service.values(field).await {
        Ok(values) => (StatusCode::OK, Json(DataResponse::new("Dropdown data retrieved successfully", values))).into_response(),
        Err(e) => error_response("Failed to load dropdown values", e),
    }
}

pub async fn get_subdistricts(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/v1/protected/dropdown/subdistricts");
    values_response(state, LocationField::Subdistrict).await
}

pub async fn get_districts(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/v1/protected/dropdown/districts");
    values_response(state, LocationField::District).await
}

pub async fn get_provinces(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/v1/protected/dropdown/provinces");
    values_response(state, LocationField::Province).await
}
