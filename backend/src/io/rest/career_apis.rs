//! # REST API for Career Categories

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use shared::{CareerCategoryRequest, DataResponse, MessageResponse, SubCategoryRequest};
use tracing::info;

use crate::domain::commands::careers::{CategoryListQuery, SubCategoryPageQuery};
use crate::domain::commands::PageRequest;
use crate::io::rest::error_response;
use crate::io::rest::mappers::CareerMapper;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryListParams {
    pub category_name: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SubCategoryPageParams {
    pub search: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

pub async fn create_category(
    State(state): State<AppState>,
    Json(request): Json<CareerCategoryRequest>,
) -> impl IntoResponse {
    info!("POST /api/v1/protected/career/categories - request: {:?}", request);

    match state.career_service.create_category(request.category_name).await {
        Ok(category) => (
            StatusCode::CREATED,
            Json(DataResponse::new("Career category created successfully", CareerMapper::category_to_dto(category))),
        )
            .into_response(),
        Err(e) => error_response("Failed to create career category", e),
    }
}

pub async fn list_categories(
    State(state): State<AppState>,
    Query(params): Query<CategoryListParams>,
) -> impl IntoResponse {
    info!("GET /api/v1/protected/career/categories - query: {:?}", params);

    let query = CategoryListQuery {
        category_name: params.category_name,
        search: params.search,
    };

    match state.career_service.list_categories(query).await {
        Ok(categories) => {
            let data: Vec<_> = categories.into_iter().map(CareerMapper::category_to_dto).collect();
            (StatusCode::OK, Json(DataResponse::new("Career categories retrieved successfully", data))).into_response()
        }
        Err(e) => error_response("Failed to list career categories", e),
    }
}

pub async fn get_category(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    info!("GET /api/v1/protected/career/categories/{}", id);

    match state.career_service.get_category(&id).await {
        Ok(category) => (
            StatusCode::OK,
            Json(DataResponse::new("Career category retrieved successfully", CareerMapper::category_to_dto(category))),
        )
            .into_response(),
        Err(e) => error_response("Failed to get career category", e),
    }
}

pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<CareerCategoryRequest>,
) -> impl IntoResponse {
    info!("PUT /api/v1/protected/career/categories/{} - request: {:?}", id, request);

    match state.career_service.update_category(&id, request.category_name).await {
        Ok(category) => (
            StatusCode::OK,
            Json(DataResponse::new("Career category updated successfully", CareerMapper::category_to_dto(category))),
        )
            .into_response(),
        Err(e) => error_response("Failed to update career category", e),
    }
}

pub async fn delete_category(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    info!("DELETE /api/v1/protected/career/categories/{}", id);

    match state.career_service.delete_category(&id).await {
        Ok(()) => (StatusCode::OK, Json(MessageResponse::new("Career category deleted successfully"))).into_response(),
        Err(e) => error_response("Failed to delete career category", e),
    }
}

pub async fn list_sub_categories_by_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<SubCategoryPageParams>,
) -> impl IntoResponse {
    info!("GET /api/v1/protected/career/categories/{}/subcategories - query: {:?}", id, params);

    let query = SubCategoryPageQuery {
        page: PageRequest::parse(params.page.as_deref(), params.limit.as_deref()),
        search: params.search,
    };

    match state.career_service.list_sub_categories_by_category(&id, query).await {
        Ok(page) => (StatusCode::OK, Json(CareerMapper::to_sub_category_list_dto(page))).into_response(),
        Err(e) => error_response("Failed to list sub categories of category", e),
    }
}

pub async fn create_sub_category(
    State(state): State<AppState>,
    Json(request): Json<SubCategoryRequest>,
) -> impl IntoResponse {
    info!("POST /api/v1/protected/career/subcategories - request: {:?}", request);

    match state
        .career_service
        .create_sub_category(CareerMapper::to_sub_category_command(request))
        .await
    {
        Ok(sub) => (
            StatusCode::CREATED,
            Json(DataResponse::new("Sub category created successfully", CareerMapper::sub_category_to_dto(sub))),
        )
            .into_response(),
        Err(e) => error_response("Failed to create sub category", e),
    }
}

pub async fn list_sub_categories(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/v1/protected/career/subcategories");

    match state.career_service.list_sub_categories().await {
        Ok(subs) => {
            let data: Vec<_> = subs.into_iter().map(CareerMapper::sub_category_to_dto).collect();
            (StatusCode::OK, Json(DataResponse::new("Sub categories retrieved successfully", data))).into_response()
        }
        Err(e) => error_response("Failed to list sub categories", e),
    }
}

pub async fn get_sub_category(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    info!("GET /api/v1/protected/career/subcategories/{}", id);

    match state.career_service.get_sub_category(&id).await {
        Ok(sub) => (
            StatusCode::OK,
            Json(DataResponse::new("Sub category retrieved successfully", CareerMapper::sub_category_to_dto(sub))),
        )
            .into_response(),
        Err(e) => error_response("Failed to get sub category", e),
    }
}

pub async fn update_sub_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<SubCategoryRequest>,
) -> impl IntoResponse {
    info!("PUT /api/v1/protected/career/subcategories/{} - request: {:?}", id, request);

    match state
        .career_service
        .update_sub_category(&id, CareerMapper::to_sub_category_command(request))
        .await
    {
        Ok(sub) => (
            StatusCode::OK,
            Json(DataResponse::new("Sub category updated successfully", CareerMapper::sub_category_to_dto(sub))),
        )
            .into_response(),
        Err(e) => error_response("Failed to update sub category", e),
    }
}

pub async fn delete_sub_category(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    info!("DELETE /api/v1/protected/career/subcategories/{}", id);

    match state.career_service.delete_sub_category(&id).await {
        Ok(()) => (StatusCode::OK, Json(MessageResponse::new("Sub category deleted successfully"))).into_response(),
        Err(e) => error_response("Failed to delete sub category", e),
    }
}
