//! Tag endpoints.

use axum::{Json, Router, extract::State, routing::post};
use newsdesk_common::AppResult;
use newsdesk_db::entities::tag;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{middleware::AppState, response::ApiResponse};

/// Tag response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagResponse {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

impl From<tag::Model> for TagResponse {
    fn from(value: tag::Model) -> Self {
        Self {
            id: value.id,
            name: value.name,
            slug: value.slug,
        }
    }
}

/// List all tags.
async fn list_tags(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<TagResponse>>> {
    let tags = state.tag_service.list().await?;
    Ok(ApiResponse::ok(tags.into_iter().map(Into::into).collect()))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/list", post(list_tags))
}

/// Create tag request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTagRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub slug: Option<String>,
}

/// Create a tag.
async fn create_tag(
    State(state): State<AppState>,
    Json(req): Json<CreateTagRequest>,
) -> AppResult<ApiResponse<TagResponse>> {
    req.validate()?;
    let created = state.tag_service.create(req.name, req.slug).await?;
    Ok(ApiResponse::ok(created.into()))
}

/// Update tag request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTagRequest {
    pub tag_id: i64,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub slug: Option<String>,
}

/// Rename a tag.
async fn update_tag(
    State(state): State<AppState>,
    Json(req): Json<UpdateTagRequest>,
) -> AppResult<ApiResponse<TagResponse>> {
    req.validate()?;
    let updated = state
        .tag_service
        .update(req.tag_id, req.name, req.slug)
        .await?;
    Ok(ApiResponse::ok(updated.into()))
}

/// Delete tag request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteTagRequest {
    pub tag_id: i64,
}

/// Delete a tag.
async fn delete_tag(
    State(state): State<AppState>,
    Json(req): Json<DeleteTagRequest>,
) -> AppResult<impl axum::response::IntoResponse> {
    state.tag_service.delete(req.tag_id).await?;
    Ok(crate::response::ok())
}

pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create_tag))
        .route("/update", post(update_tag))
        .route("/delete", post(delete_tag))
}
