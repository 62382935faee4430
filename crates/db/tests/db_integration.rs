//! Database integration tests.
//!
//! These tests require a running `PostgreSQL` instance.
//! Run with: `cargo test --test db_integration -- --ignored`
//!
//! Environment variables:
//!   `TEST_DB_HOST` (default: localhost)
//!   `TEST_DB_PORT` (default: 5433)
//!   `TEST_DB_USER` (default: `newsdesk_test`)
//!   `TEST_DB_PASSWORD` (default: `newsdesk_test`)
//!   `TEST_DB_NAME` (default: `newsdesk_test`)

#![allow(clippy::unwrap_used, clippy::expect_used)]

use chrono::{Duration, Utc};
use newsdesk_db::entities::{poll, poll::PollStatus, poll_option};
use newsdesk_db::repositories::{PollFilter, PollOptionRepository, PollRepository};
use newsdesk_db::test_utils::{TestDatabase, TestDbConfig};
use sea_orm::{NotSet, Set};
use std::sync::Arc;

async fn seed_poll(
    polls: &PollRepository,
    options: &PollOptionRepository,
    status: PollStatus,
    expires_at: Option<chrono::DateTime<Utc>>,
    texts: &[&str],
) -> (poll::Model, Vec<poll_option::Model>) {
    let created = polls
        .create(poll::ActiveModel {
            id: NotSet,
            question: Set("Integration poll?".to_string()),
            category: Set("general".to_string()),
            status: Set(status),
            expires_at: Set(expires_at.map(Into::into)),
            featured: Set(false),
            created_at: Set(Utc::now().into()),
        })
        .await
        .unwrap();

    let mut created_options = Vec::new();
    for (i, text) in texts.iter().enumerate() {
        let option = options
            .create(poll_option::ActiveModel {
                id: NotSet,
                poll_id: Set(created.id),
                text: Set((*text).to_string()),
                votes: Set(0),
                position: Set(i as i32),
            })
            .await
            .unwrap();
        created_options.push(option);
    }

    (created, created_options)
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_database_connection() {
    let config = TestDbConfig::default();
    let result = TestDatabase::with_config(config).await;
    assert!(result.is_ok(), "Failed to connect: {:?}", result.err());
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_poll_delete_cascades_to_options() {
    let db = TestDatabase::new().await.expect("Failed to connect");
    db.cleanup().await.unwrap();

    let conn = Arc::new(db.conn);
    let polls = PollRepository::new(Arc::clone(&conn));
    let options = PollOptionRepository::new(conn);

    let (created, created_options) =
        seed_poll(&polls, &options, PollStatus::Active, None, &["Yes", "No"]).await;
    assert_eq!(created_options.len(), 2);

    polls.delete(created.id).await.unwrap();

    assert!(polls.find_by_id(created.id).await.unwrap().is_none());
    for option in created_options {
        assert!(options.find_by_id(option.id).await.unwrap().is_none());
    }
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_end_expired_demotes_only_past_expiry() {
    let db = TestDatabase::new().await.expect("Failed to connect");
    db.cleanup().await.unwrap();

    let conn = Arc::new(db.conn);
    let polls = PollRepository::new(Arc::clone(&conn));
    let options = PollOptionRepository::new(conn);

    let past = Utc::now() - Duration::hours(1);
    let future = Utc::now() + Duration::hours(1);

    let (expired, _) =
        seed_poll(&polls, &options, PollStatus::Active, Some(past), &["A", "B"]).await;
    let (running, _) =
        seed_poll(&polls, &options, PollStatus::Active, Some(future), &["A", "B"]).await;
    let (evergreen, _) = seed_poll(&polls, &options, PollStatus::Active, None, &["A", "B"]).await;

    let demoted = polls.end_expired(Utc::now()).await.unwrap();
    assert_eq!(demoted, 1);

    assert_eq!(
        polls.get_by_id(expired.id).await.unwrap().status,
        PollStatus::Ended
    );
    assert_eq!(
        polls.get_by_id(running.id).await.unwrap().status,
        PollStatus::Active
    );
    // A poll without an expiry never auto-ends.
    assert_eq!(
        polls.get_by_id(evergreen.id).await.unwrap().status,
        PollStatus::Active
    );

    let active = polls
        .list(&PollFilter {
            status: Some(PollStatus::Active),
            ..PollFilter::default()
        })
        .await
        .unwrap();
    assert!(active.iter().all(|p| p.id != expired.id));
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_concurrent_increments_are_not_lost() {
    let db = TestDatabase::new().await.expect("Failed to connect");
    db.cleanup().await.unwrap();

    let conn = Arc::new(db.conn);
    let polls = PollRepository::new(Arc::clone(&conn));
    let options = PollOptionRepository::new(Arc::clone(&conn));

    let (_, created_options) =
        seed_poll(&polls, &options, PollStatus::Active, None, &["Yes", "No"]).await;
    let target = created_options[0].id;

    // N concurrent increments on the same option must increase the counter
    // by exactly N.
    let n = 50;
    let mut handles = Vec::new();
    for _ in 0..n {
        let options = PollOptionRepository::new(Arc::clone(&conn));
        handles.push(tokio::spawn(
            async move { options.increment_votes(target).await },
        ));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), 1);
    }

    let reloaded = options.find_by_id(target).await.unwrap().unwrap();
    assert_eq!(reloaded.votes, i64::from(n));

    let untouched = options.find_by_id(created_options[1].id).await.unwrap().unwrap();
    assert_eq!(untouched.votes, 0);
}
