//! API integration tests over a mocked database.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use chrono::Utc;
use http_body_util::BodyExt;
use newsdesk_api::{AppState, router};
use newsdesk_db::entities::{category, poll, poll::PollStatus, poll_option, site_settings};
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
use serde_json::{Value, json};
use tower::ServiceExt;

fn app(db: sea_orm::DatabaseConnection) -> Router {
    router().with_state(AppState::from_connection(Arc::new(db)))
}

fn mock_poll(id: i64, status: PollStatus) -> poll::Model {
    poll::Model {
        id,
        question: "Best headline of the week?".to_string(),
        category: "general".to_string(),
        status,
        expires_at: None,
        featured: false,
        created_at: Utc::now().into(),
    }
}

fn mock_option(id: i64, poll_id: i64, text: &str, votes: i64, position: i32) -> poll_option::Model {
    poll_option::Model {
        id,
        poll_id,
        text: text.to_string(),
        votes,
        position,
    }
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn test_vote_returns_fresh_tallies() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[mock_poll(1, PollStatus::Active)]])
        .append_query_results([[mock_option(11, 1, "B", 1, 1)]])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .append_query_results([[
            mock_option(10, 1, "A", 3, 0),
            mock_option(11, 1, "B", 2, 1),
        ]])
        .into_connection();

    let (status, body) = post_json(
        app(db),
        "/polls/vote",
        json!({"pollId": 1, "optionId": 11}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["pollId"], 1);
    assert_eq!(data["totalVotes"], 5);
    assert_eq!(data["results"][0]["percentage"], 60);
    assert_eq!(data["results"][1]["percentage"], 40);
}

#[tokio::test]
async fn test_vote_on_ended_poll_is_poll_not_active() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[mock_poll(1, PollStatus::Ended)]])
        .into_connection();

    let (status, body) = post_json(
        app(db),
        "/polls/vote",
        json!({"pollId": 1, "optionId": 11}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "POLL_NOT_ACTIVE");
}

#[tokio::test]
async fn test_vote_for_foreign_option_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[mock_poll(1, PollStatus::Active)]])
        .append_query_results([[mock_option(11, 2, "Wrong poll", 0, 0)]])
        .into_connection();

    let (status, body) = post_json(
        app(db),
        "/polls/vote",
        json!({"pollId": 1, "optionId": 11}),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_list_polls_sweeps_and_reports_status() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .append_query_results([[mock_poll(1, PollStatus::Ended)]])
        .append_query_results([[
            mock_option(10, 1, "A", 4, 0),
            mock_option(11, 1, "B", 4, 1),
        ]])
        .into_connection();

    let (status, body) = post_json(app(db), "/polls/list", json!({})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["status"], "ended");
    assert_eq!(body["data"][0]["totalVotes"], 8);
}

#[tokio::test]
async fn test_show_settings_materializes_defaults() {
    let now = Utc::now();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<site_settings::Model>::new()])
        .append_query_results([[site_settings::Model {
            id: 1,
            site_name: "Newsdesk".to_string(),
            tagline: None,
            description: None,
            logo_url: None,
            contact_email: None,
            footer_text: None,
            articles_per_page: 20,
            ticker_enabled: true,
            social_links: json!({}),
            created_at: now.into(),
            updated_at: None,
        }]])
        .into_connection();

    let (status, body) = post_json(app(db), "/settings/show", json!({})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["siteName"], "Newsdesk");
    assert_eq!(body["data"]["articlesPerPage"], 20);
}

#[tokio::test]
async fn test_list_categories() {
    let now = Utc::now();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[
            category::Model {
                id: 1,
                name: "Politics".to_string(),
                slug: "politics".to_string(),
                description: None,
                position: 0,
                created_at: now.into(),
            },
            category::Model {
                id: 2,
                name: "Sports".to_string(),
                slug: "sports".to_string(),
                description: None,
                position: 1,
                created_at: now.into(),
            },
        ]])
        .into_connection();

    let (status, body) = post_json(app(db), "/categories/list", json!({})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"][0]["slug"], "politics");
}

#[tokio::test]
async fn test_admin_create_poll_rejects_single_option() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

    let (status, body) = post_json(
        app(db),
        "/admin/polls/create",
        json!({
            "question": "Lonely poll?",
            "category": "general",
            "options": ["Only choice"]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_REQUEST");
}
