//! Category and subcategory endpoints.

use axum::{Json, Router, extract::State, routing::post};
use newsdesk_common::AppResult;
use newsdesk_core::{CreateCategoryInput, CreateSubcategoryInput};
use newsdesk_db::entities::{category, subcategory};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{middleware::AppState, response::ApiResponse};

/// Category response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub position: i32,
}

impl From<category::Model> for CategoryResponse {
    fn from(value: category::Model) -> Self {
        Self {
            id: value.id,
            name: value.name,
            slug: value.slug,
            description: value.description,
            position: value.position,
        }
    }
}

/// Subcategory response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubcategoryResponse {
    pub id: i64,
    pub category_id: i64,
    pub name: String,
    pub slug: String,
}

impl From<subcategory::Model> for SubcategoryResponse {
    fn from(value: subcategory::Model) -> Self {
        Self {
            id: value.id,
            category_id: value.category_id,
            name: value.name,
            slug: value.slug,
        }
    }
}

/// List categories in navigation order.
async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<CategoryResponse>>> {
    let categories = state.category_service.list().await?;
    Ok(ApiResponse::ok(
        categories.into_iter().map(Into::into).collect(),
    ))
}

/// Show category request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowCategoryRequest {
    pub category_id: i64,
}

/// Category with its subcategories.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDetailResponse {
    #[serde(flatten)]
    pub category: CategoryResponse,
    pub subcategories: Vec<SubcategoryResponse>,
}

/// Get a category and its subcategories.
async fn show_category(
    State(state): State<AppState>,
    Json(req): Json<ShowCategoryRequest>,
) -> AppResult<ApiResponse<CategoryDetailResponse>> {
    let category = state.category_service.get(req.category_id).await?;
    let subcategories = state.category_service.subcategories(req.category_id).await?;
    Ok(ApiResponse::ok(CategoryDetailResponse {
        category: category.into(),
        subcategories: subcategories.into_iter().map(Into::into).collect(),
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/list", post(list_categories))
        .route("/show", post(show_category))
}

/// Create category request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub position: i32,
}

/// Create a category.
async fn create_category(
    State(state): State<AppState>,
    Json(req): Json<CreateCategoryRequest>,
) -> AppResult<ApiResponse<CategoryResponse>> {
    req.validate()?;
    let created = state
        .category_service
        .create(CreateCategoryInput {
            name: req.name,
            slug: req.slug,
            description: req.description,
            position: req.position,
        })
        .await?;
    Ok(ApiResponse::ok(created.into()))
}

/// Update category request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryRequest {
    pub category_id: i64,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub position: i32,
}

/// Edit a category.
async fn update_category(
    State(state): State<AppState>,
    Json(req): Json<UpdateCategoryRequest>,
) -> AppResult<ApiResponse<CategoryResponse>> {
    req.validate()?;
    let updated = state
        .category_service
        .update(
            req.category_id,
            CreateCategoryInput {
                name: req.name,
                slug: req.slug,
                description: req.description,
                position: req.position,
            },
        )
        .await?;
    Ok(ApiResponse::ok(updated.into()))
}

/// Delete category request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCategoryRequest {
    pub category_id: i64,
}

/// Delete a category and everything under it.
async fn delete_category(
    State(state): State<AppState>,
    Json(req): Json<DeleteCategoryRequest>,
) -> AppResult<impl axum::response::IntoResponse> {
    state.category_service.delete(req.category_id).await?;
    Ok(crate::response::ok())
}

/// Create subcategory request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubcategoryRequest {
    pub category_id: i64,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub slug: Option<String>,
}

/// Create a subcategory.
async fn create_subcategory(
    State(state): State<AppState>,
    Json(req): Json<CreateSubcategoryRequest>,
) -> AppResult<ApiResponse<SubcategoryResponse>> {
    req.validate()?;
    let created = state
        .category_service
        .create_subcategory(CreateSubcategoryInput {
            category_id: req.category_id,
            name: req.name,
            slug: req.slug,
        })
        .await?;
    Ok(ApiResponse::ok(created.into()))
}

/// Update subcategory request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubcategoryRequest {
    pub subcategory_id: i64,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub slug: Option<String>,
}

/// Rename a subcategory.
async fn update_subcategory(
    State(state): State<AppState>,
    Json(req): Json<UpdateSubcategoryRequest>,
) -> AppResult<ApiResponse<SubcategoryResponse>> {
    req.validate()?;
    let updated = state
        .category_service
        .update_subcategory(req.subcategory_id, req.name, req.slug)
        .await?;
    Ok(ApiResponse::ok(updated.into()))
}

/// Delete subcategory request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSubcategoryRequest {
    pub subcategory_id: i64,
}

/// Delete a subcategory. Its articles stay under the parent category.
async fn delete_subcategory(
    State(state): State<AppState>,
    Json(req): Json<DeleteSubcategoryRequest>,
) -> AppResult<impl axum::response::IntoResponse> {
    state
        .category_service
        .delete_subcategory(req.subcategory_id)
        .await?;
    Ok(crate::response::ok())
}

pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create_category))
        .route("/update", post(update_category))
        .route("/delete", post(delete_category))
        .route("/subcategories/create", post(create_subcategory))
        .route("/subcategories/update", post(update_subcategory))
        .route("/subcategories/delete", post(delete_subcategory))
}
