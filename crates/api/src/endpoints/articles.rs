//! Article endpoints.

use axum::{Json, Router, extract::State, routing::post};
use newsdesk_common::{AppError, AppResult};
use newsdesk_core::{ArticleWithTags, CreateArticleInput, UpdateArticleInput};
use newsdesk_db::repositories::ArticleFilter;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{middleware::AppState, response::ApiResponse};

const DEFAULT_PAGE_SIZE: u64 = 20;
const MAX_PAGE_SIZE: u64 = 100;

/// Tag summary nested in article responses.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagSummary {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

/// Article response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleResponse {
    pub id: i64,
    pub title: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub body: String,
    pub category_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub featured: bool,
    pub published: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    pub created_at: String,
    pub tags: Vec<TagSummary>,
}

impl From<ArticleWithTags> for ArticleResponse {
    fn from(value: ArticleWithTags) -> Self {
        Self {
            id: value.article.id,
            title: value.article.title,
            slug: value.article.slug,
            summary: value.article.summary,
            body: value.article.body,
            category_id: value.article.category_id,
            subcategory_id: value.article.subcategory_id,
            image_url: value.article.image_url,
            featured: value.article.featured,
            published: value.article.published,
            published_at: value.article.published_at.map(|p| p.to_rfc3339()),
            created_at: value.article.created_at.to_rfc3339(),
            tags: value
                .tags
                .into_iter()
                .map(|t| TagSummary {
                    id: t.id,
                    name: t.name,
                    slug: t.slug,
                })
                .collect(),
        }
    }
}

/// List articles request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListArticlesRequest {
    pub category_id: Option<i64>,
    pub subcategory_id: Option<i64>,
    pub tag_id: Option<i64>,
    pub featured: Option<bool>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

/// Paginated article listing.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleListResponse {
    pub articles: Vec<ArticleResponse>,
    pub total: u64,
}

fn build_filter(req: &ListArticlesRequest, published: Option<bool>) -> ArticleFilter {
    ArticleFilter {
        category_id: req.category_id,
        subcategory_id: req.subcategory_id,
        tag_id: req.tag_id,
        featured: req.featured,
        published,
        limit: req.limit.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE),
        offset: req.offset.unwrap_or(0),
    }
}

/// List published articles, newest first.
async fn list_articles(
    State(state): State<AppState>,
    Json(req): Json<ListArticlesRequest>,
) -> AppResult<ApiResponse<ArticleListResponse>> {
    // The public listing only ever shows published articles.
    let filter = build_filter(&req, Some(true));
    let total = state.article_service.count(&filter).await?;
    let articles = state.article_service.list(&filter).await?;
    Ok(ApiResponse::ok(ArticleListResponse {
        articles: articles.into_iter().map(Into::into).collect(),
        total,
    }))
}

/// Show article request: by id or by slug.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShowArticleRequest {
    pub article_id: Option<i64>,
    pub slug: Option<String>,
}

/// Get one article.
async fn show_article(
    State(state): State<AppState>,
    Json(req): Json<ShowArticleRequest>,
) -> AppResult<ApiResponse<ArticleResponse>> {
    let article = match (req.article_id, req.slug) {
        (Some(id), _) => state.article_service.get(id).await?,
        (None, Some(slug)) => state.article_service.get_by_slug(&slug).await?,
        (None, None) => {
            return Err(AppError::InvalidRequest(
                "Either articleId or slug is required".to_string(),
            ));
        }
    };
    Ok(ApiResponse::ok(article.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/list", post(list_articles))
        .route("/show", post(show_article))
}

/// Admin listing: drafts included.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdminListArticlesRequest {
    #[serde(flatten)]
    pub base: ListArticlesRequest,
    pub published: Option<bool>,
}

/// List articles for the admin console, drafts included.
async fn admin_list_articles(
    State(state): State<AppState>,
    Json(req): Json<AdminListArticlesRequest>,
) -> AppResult<ApiResponse<ArticleListResponse>> {
    let filter = build_filter(&req.base, req.published);
    let total = state.article_service.count(&filter).await?;
    let articles = state.article_service.list(&filter).await?;
    Ok(ApiResponse::ok(ArticleListResponse {
        articles: articles.into_iter().map(Into::into).collect(),
        total,
    }))
}

/// Create article request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateArticleRequest {
    #[validate(length(min = 1, max = 300))]
    pub title: String,
    pub slug: Option<String>,
    pub summary: Option<String>,
    #[validate(length(min = 1))]
    pub body: String,
    pub category_id: i64,
    pub subcategory_id: Option<i64>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub tag_ids: Vec<i64>,
}

/// Create an article.
async fn create_article(
    State(state): State<AppState>,
    Json(req): Json<CreateArticleRequest>,
) -> AppResult<ApiResponse<ArticleResponse>> {
    req.validate()?;
    let created = state
        .article_service
        .create(CreateArticleInput {
            title: req.title,
            slug: req.slug,
            summary: req.summary,
            body: req.body,
            category_id: req.category_id,
            subcategory_id: req.subcategory_id,
            image_url: req.image_url,
            featured: req.featured,
            published: req.published,
            tag_ids: req.tag_ids,
        })
        .await?;
    Ok(ApiResponse::ok(created.into()))
}

/// Update article request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateArticleRequest {
    pub article_id: i64,
    #[validate(length(min = 1, max = 300))]
    pub title: String,
    pub slug: Option<String>,
    pub summary: Option<String>,
    #[validate(length(min = 1))]
    pub body: String,
    pub category_id: i64,
    pub subcategory_id: Option<i64>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub tag_ids: Vec<i64>,
}

/// Edit an article.
async fn update_article(
    State(state): State<AppState>,
    Json(req): Json<UpdateArticleRequest>,
) -> AppResult<ApiResponse<ArticleResponse>> {
    req.validate()?;
    let updated = state
        .article_service
        .update(
            req.article_id,
            UpdateArticleInput {
                title: req.title,
                slug: req.slug,
                summary: req.summary,
                body: req.body,
                category_id: req.category_id,
                subcategory_id: req.subcategory_id,
                image_url: req.image_url,
                featured: req.featured,
                published: req.published,
                tag_ids: req.tag_ids,
            },
        )
        .await?;
    Ok(ApiResponse::ok(updated.into()))
}

/// Publish request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishArticleRequest {
    pub article_id: i64,
    pub published: bool,
}

/// Publish or unpublish an article.
async fn publish_article(
    State(state): State<AppState>,
    Json(req): Json<PublishArticleRequest>,
) -> AppResult<ApiResponse<ArticleResponse>> {
    let updated = state
        .article_service
        .set_published(req.article_id, req.published)
        .await?;
    Ok(ApiResponse::ok(updated.into()))
}

/// Delete article request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteArticleRequest {
    pub article_id: i64,
}

/// Delete an article.
async fn delete_article(
    State(state): State<AppState>,
    Json(req): Json<DeleteArticleRequest>,
) -> AppResult<impl axum::response::IntoResponse> {
    state.article_service.delete(req.article_id).await?;
    Ok(crate::response::ok())
}

pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/list", post(admin_list_articles))
        .route("/create", post(create_article))
        .route("/update", post(update_article))
        .route("/publish", post(publish_article))
        .route("/delete", post(delete_article))
}
