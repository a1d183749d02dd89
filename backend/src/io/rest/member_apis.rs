//! # REST API for Members
//!
//! Filtered listing plus create, read, update and delete.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use shared::{DataResponse, MemberRequest, MessageResponse};
use tracing::info;

use crate::domain::commands::members::MemberListQuery;
use crate::domain::commands::PageRequest;
use crate::io::rest::error_response;
use crate::io::rest::mappers::MemberMapper;
use crate::AppState;

// Query parameters for member listing API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberListParams {
    pub full_name: Option<String>,
    pub subdistrict: Option<String>,
    pub district: Option<String>,
    pub province: Option<String>,
    pub account_year: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

pub async fn list_members(
    State(state): State<AppState>,
    Query(params): Query<MemberListParams>,
) -> impl IntoResponse {
    info!("GET /api/v1/protected/members - query: {:?}", params);

    let query = MemberListQuery {
        page: PageRequest::parse(params.page.as_deref(), params.limit.as_deref()),
        full_name: params.full_name,
        subdistrict: params.subdistrict,
        district: params.district,
        province: params.province,
        account_year: params.account_year,
    };

    match state.member_service.list_members(query).await {
        Ok(page) => (StatusCode::OK, Json(MemberMapper::to_list_dto(page))).into_response(),
        Err(e) => error_response("Failed to list members", e),
    }
}

pub async fn create_member(
    State(state): State<AppState>,
    Json(request): Json<MemberRequest>,
) -> impl IntoResponse {
    info!("POST /api/v1/protected/members - member_id: {}", request.member_id);

    match state.member_service.create_member(MemberMapper::to_command(request)).await {
        Ok(member) => (
            StatusCode::CREATED,
            Json(DataResponse::new("Member created successfully", MemberMapper::to_dto(member))),
        )
            .into_response(),
        Err(e) => error_response("Failed to create member", e),
    }
}

pub async fn get_member(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    info!("GET /api/v1/protected/members/{}", id);

    match state.member_service.get_member(&id).await {
        Ok(member) => (
            StatusCode::OK,
            Json(DataResponse::new("Member retrieved successfully", MemberMapper::to_dto(member))),
        )
            .into_response(),
        Err(e) => error_response("Failed to get member", e),
    }
}

pub async fn update_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<MemberRequest>,
) -> impl IntoResponse {
    info!("PUT /api/v1/protected/members/{}", id);

    match state.member_service.update_member(&id, MemberMapper::to_command(request)).await {
        Ok(member) => (
            StatusCode::OK,
            Json(DataResponse::new("Member updated successfully", MemberMapper::to_dto(member))),
        )
            .into_response(),
        Err(e) => error_response("Failed to update member", e),
    }
}

pub async fn delete_member(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    info!("DELETE /api/v1/protected/members/{}", id);

    match state.member_service.delete_member(&id).await {
        Ok(()) => (StatusCode::OK, Json(MessageResponse::new("Member deleted successfully"))).into_response(),
        Err(e) => error_response("Failed to delete member", e),
    }
}
