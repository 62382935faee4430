//! Poll endpoints.

use axum::{Json, Router, extract::State, routing::post};
use chrono::{DateTime, Utc};
use newsdesk_common::AppResult;
use newsdesk_core::{
    CreatePollInput, OptionTally, PollOptionInput, PollWithTally, UpdatePollInput,
};
use newsdesk_db::{entities::poll::PollStatus, repositories::PollFilter};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{middleware::AppState, response::ApiResponse};

/// Poll response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PollResponse {
    pub id: i64,
    pub question: String,
    pub category: String,
    pub status: PollStatus,
    pub featured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
    pub created_at: String,
    pub total_votes: i64,
    pub options: Vec<OptionTally>,
}

impl From<PollWithTally> for PollResponse {
    fn from(value: PollWithTally) -> Self {
        Self {
            id: value.poll.id,
            question: value.poll.question,
            category: value.poll.category,
            status: value.poll.status,
            featured: value.poll.featured,
            expires_at: value.poll.expires_at.map(|e| e.to_rfc3339()),
            created_at: value.poll.created_at.to_rfc3339(),
            total_votes: value.tally.total_votes,
            options: value.tally.options,
        }
    }
}

/// List polls request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListPollsRequest {
    pub status: Option<PollStatus>,
    pub category: Option<String>,
    pub featured: Option<bool>,
    pub limit: Option<u64>,
}

/// List polls, newest first.
async fn list_polls(
    State(state): State<AppState>,
    Json(req): Json<ListPollsRequest>,
) -> AppResult<ApiResponse<Vec<PollResponse>>> {
    let filter = PollFilter {
        status: req.status,
        category: req.category,
        featured: req.featured,
        limit: req.limit,
    };
    let polls = state.poll_service.list(&filter).await?;
    Ok(ApiResponse::ok(polls.into_iter().map(Into::into).collect()))
}

/// Show poll request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowPollRequest {
    pub poll_id: i64,
}

/// Get one poll with its current tallies.
async fn show_poll(
    State(state): State<AppState>,
    Json(req): Json<ShowPollRequest>,
) -> AppResult<ApiResponse<PollResponse>> {
    let poll = state.poll_service.get(req.poll_id).await?;
    Ok(ApiResponse::ok(poll.into()))
}

/// Vote request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    pub poll_id: i64,
    pub option_id: i64,
}

/// Vote response: the tallies as they stood right after this vote.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteResponse {
    pub success: bool,
    pub poll_id: i64,
    pub total_votes: i64,
    pub results: Vec<OptionTally>,
}

/// Record a vote.
async fn vote(
    State(state): State<AppState>,
    Json(req): Json<VoteRequest>,
) -> AppResult<ApiResponse<VoteResponse>> {
    let tally = state.poll_service.vote(req.poll_id, req.option_id).await?;
    Ok(ApiResponse::ok(VoteResponse {
        success: true,
        poll_id: req.poll_id,
        total_votes: tally.total_votes,
        results: tally.options,
    }))
}

/// Results request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollResultsRequest {
    pub poll_id: i64,
}

/// Ranked results response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PollResultsResponse {
    pub poll: PollResponse,
    pub ranked: Vec<OptionTally>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<u8>,
}

/// Get results ranked by vote count.
async fn poll_results(
    State(state): State<AppState>,
    Json(req): Json<PollResultsRequest>,
) -> AppResult<ApiResponse<PollResultsResponse>> {
    let (poll, ranking) = state.poll_service.results(req.poll_id).await?;
    Ok(ApiResponse::ok(PollResultsResponse {
        poll: poll.into(),
        ranked: ranking.ranked,
        margin: ranking.margin,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/list", post(list_polls))
        .route("/show", post(show_poll))
        .route("/vote", post(vote))
        .route("/results", post(poll_results))
}

/// Create poll request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePollRequest {
    #[validate(length(min = 1, max = 500))]
    pub question: String,
    pub category: String,
    #[serde(default)]
    pub status: Option<PollStatus>,
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub featured: bool,
    #[validate(length(min = 2, max = 10))]
    pub options: Vec<String>,
}

/// Create a poll.
async fn create_poll(
    State(state): State<AppState>,
    Json(req): Json<CreatePollRequest>,
) -> AppResult<ApiResponse<PollResponse>> {
    req.validate()?;
    let created = state
        .poll_service
        .create(CreatePollInput {
            question: req.question,
            category: req.category,
            status: req.status.unwrap_or(PollStatus::Draft),
            expires_at: req.expires_at,
            featured: req.featured,
            options: req.options,
        })
        .await?;
    Ok(ApiResponse::ok(created.into()))
}

/// One option in an update payload.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollOptionPayload {
    pub id: Option<i64>,
    pub text: String,
}

/// Update poll request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePollRequest {
    pub poll_id: i64,
    #[validate(length(min = 1, max = 500))]
    pub question: String,
    pub category: String,
    pub status: PollStatus,
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub featured: bool,
    #[validate(length(min = 2, max = 10))]
    pub options: Vec<PollOptionPayload>,
}

/// Edit a poll. Option changes are diffed against the stored options.
async fn update_poll(
    State(state): State<AppState>,
    Json(req): Json<UpdatePollRequest>,
) -> AppResult<ApiResponse<PollResponse>> {
    req.validate()?;
    let updated = state
        .poll_service
        .update(
            req.poll_id,
            UpdatePollInput {
                question: req.question,
                category: req.category,
                status: req.status,
                expires_at: req.expires_at,
                featured: req.featured,
                options: req
                    .options
                    .into_iter()
                    .map(|o| PollOptionInput {
                        id: o.id,
                        text: o.text,
                    })
                    .collect(),
            },
        )
        .await?;
    Ok(ApiResponse::ok(updated.into()))
}

/// Delete poll request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletePollRequest {
    pub poll_id: i64,
}

/// Delete a poll and its options.
async fn delete_poll(
    State(state): State<AppState>,
    Json(req): Json<DeletePollRequest>,
) -> AppResult<impl axum::response::IntoResponse> {
    state.poll_service.delete(req.poll_id).await?;
    Ok(crate::response::ok())
}

pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create_poll))
        .route("/update", post(update_poll))
        .route("/delete", post(delete_poll))
}
