//! Poll service.
//!
//! Owns the poll lifecycle: creation and editing by administrators, the
//! expiry sweep on listings, and vote recording with fresh tallies.

use chrono::{DateTime, Utc};
use newsdesk_common::{AppError, AppResult};
use newsdesk_db::{
    entities::{poll, poll::PollStatus, poll_option},
    repositories::{PollFilter, PollOptionRepository, PollRepository},
};
use sea_orm::{NotSet, Set};
use tracing::warn;

use crate::services::tally::{PollTally, tally};

const MIN_OPTIONS: usize = 2;
const MAX_OPTIONS: usize = 10;
const MAX_OPTION_LEN: usize = 256;

/// Poll service for business logic.
#[derive(Clone)]
pub struct PollService {
    poll_repo: PollRepository,
    option_repo: PollOptionRepository,
}

/// Input for creating a poll.
#[derive(Debug, Clone)]
pub struct CreatePollInput {
    pub question: String,
    pub category: String,
    /// Initial state; polls are created as `draft` or `active`.
    pub status: PollStatus,
    pub expires_at: Option<DateTime<Utc>>,
    pub featured: bool,
    pub options: Vec<String>,
}

/// One option in an edit payload. Options without an `id` are appended;
/// persisted options missing from the payload are removed.
#[derive(Debug, Clone)]
pub struct PollOptionInput {
    pub id: Option<i64>,
    pub text: String,
}

/// Input for editing a poll.
#[derive(Debug, Clone)]
pub struct UpdatePollInput {
    pub question: String,
    pub category: String,
    pub status: PollStatus,
    pub expires_at: Option<DateTime<Utc>>,
    pub featured: bool,
    pub options: Vec<PollOptionInput>,
}

/// A poll together with its derived tallies.
#[derive(Debug, Clone)]
pub struct PollWithTally {
    pub poll: poll::Model,
    pub tally: PollTally,
}

impl PollService {
    /// Create a new poll service.
    #[must_use]
    pub const fn new(poll_repo: PollRepository, option_repo: PollOptionRepository) -> Self {
        Self {
            poll_repo,
            option_repo,
        }
    }

    fn validate_question(question: &str) -> AppResult<()> {
        if question.trim().is_empty() {
            return Err(AppError::InvalidRequest(
                "Poll question cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    fn validate_option_texts<'a, I>(texts: I, count: usize) -> AppResult<()>
    where
        I: Iterator<Item = &'a str>,
    {
        if count < MIN_OPTIONS {
            return Err(AppError::InvalidRequest(format!(
                "Poll must have at least {MIN_OPTIONS} options"
            )));
        }
        if count > MAX_OPTIONS {
            return Err(AppError::InvalidRequest(format!(
                "Poll cannot have more than {MAX_OPTIONS} options"
            )));
        }
        for text in texts {
            if text.trim().is_empty() {
                return Err(AppError::InvalidRequest(
                    "Poll options cannot be empty".to_string(),
                ));
            }
            if text.len() > MAX_OPTION_LEN {
                return Err(AppError::InvalidRequest(format!(
                    "Poll option is too long (max {MAX_OPTION_LEN} chars)"
                )));
            }
        }
        Ok(())
    }

    /// Create a poll with its options.
    pub async fn create(&self, input: CreatePollInput) -> AppResult<PollWithTally> {
        Self::validate_question(&input.question)?;
        Self::validate_option_texts(input.options.iter().map(String::as_str), input.options.len())?;
        if input.status == PollStatus::Ended {
            return Err(AppError::InvalidRequest(
                "A poll cannot be created in the ended state".to_string(),
            ));
        }

        let created = self
            .poll_repo
            .create(poll::ActiveModel {
                id: NotSet,
                question: Set(input.question),
                category: Set(input.category),
                status: Set(input.status),
                expires_at: Set(input.expires_at.map(Into::into)),
                featured: Set(input.featured),
                created_at: Set(Utc::now().into()),
            })
            .await?;

        let mut options = Vec::with_capacity(input.options.len());
        for (i, text) in input.options.into_iter().enumerate() {
            let option = self
                .option_repo
                .create(poll_option::ActiveModel {
                    id: NotSet,
                    poll_id: Set(created.id),
                    text: Set(text),
                    votes: Set(0),
                    position: Set(i as i32),
                })
                .await?;
            options.push(option);
        }

        Ok(PollWithTally {
            tally: tally(&options),
            poll: created,
        })
    }

    /// Edit a poll, diffing its options server-side.
    ///
    /// Options carrying an id are updated in place (vote counts are kept),
    /// options without an id are appended, and persisted options absent from
    /// the payload are deleted.
    pub async fn update(&self, id: i64, input: UpdatePollInput) -> AppResult<PollWithTally> {
        Self::validate_question(&input.question)?;
        Self::validate_option_texts(
            input.options.iter().map(|o| o.text.as_str()),
            input.options.len(),
        )?;

        let existing = self.poll_repo.get_by_id(id).await?;
        let existing_options = self.option_repo.find_by_poll(id).await?;

        // Validate referenced option ids before any mutation.
        for option in &input.options {
            if let Some(option_id) = option.id
                && !existing_options.iter().any(|o| o.id == option_id)
            {
                return Err(AppError::NotFound(format!(
                    "Option {option_id} not found for poll {id}"
                )));
            }
        }

        let mut model: poll::ActiveModel = existing.into();
        model.question = Set(input.question);
        model.category = Set(input.category);
        model.status = Set(input.status);
        model.expires_at = Set(input.expires_at.map(Into::into));
        model.featured = Set(input.featured);
        let updated = self.poll_repo.update(model).await?;

        let mut next_position = existing_options
            .iter()
            .map(|o| o.position)
            .max()
            .map_or(0, |p| p + 1);

        for option in &input.options {
            match option.id {
                Some(option_id) => {
                    // Checked above; unwrap-free lookup for the current text.
                    if let Some(current) = existing_options.iter().find(|o| o.id == option_id)
                        && current.text != option.text
                    {
                        let mut model: poll_option::ActiveModel = current.clone().into();
                        model.text = Set(option.text.clone());
                        self.option_repo.update(model).await?;
                    }
                }
                None => {
                    self.option_repo
                        .create(poll_option::ActiveModel {
                            id: NotSet,
                            poll_id: Set(id),
                            text: Set(option.text.clone()),
                            votes: Set(0),
                            position: Set(next_position),
                        })
                        .await?;
                    next_position += 1;
                }
            }
        }

        let removed: Vec<i64> = existing_options
            .iter()
            .filter(|o| !input.options.iter().any(|i| i.id == Some(o.id)))
            .map(|o| o.id)
            .collect();
        self.option_repo.delete_many(&removed).await?;

        let options = self.option_repo.find_by_poll(id).await?;
        Ok(PollWithTally {
            tally: tally(&options),
            poll: updated,
        })
    }

    /// Delete a poll and, via the cascade, its options.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.poll_repo.get_by_id(id).await?;
        self.poll_repo.delete(id).await
    }

    /// Get a poll with its tallied options.
    pub async fn get(&self, id: i64) -> AppResult<PollWithTally> {
        let poll = self.poll_repo.get_by_id(id).await?;
        let options = self.option_repo.find_by_poll(id).await?;
        Ok(PollWithTally {
            tally: tally(&options),
            poll,
        })
    }

    /// List polls matching the filter, each with tallied options.
    ///
    /// Any listing that can return active polls first sweeps expired polls
    /// to `ended`, so no poll is presented as active past its expiry. A
    /// sweep failure is logged and swallowed: the read proceeds with the
    /// data available, accepting that a stale `active` status may be
    /// returned for this one read.
    pub async fn list(&self, filter: &PollFilter) -> AppResult<Vec<PollWithTally>> {
        let may_return_active = !matches!(
            filter.status,
            Some(PollStatus::Draft | PollStatus::Ended)
        );
        if may_return_active
            && let Err(e) = self.poll_repo.end_expired(Utc::now()).await
        {
            warn!(error = %e, "Expiry sweep failed; listing proceeds with stale statuses");
        }

        let polls = self.poll_repo.list(filter).await?;

        let mut results = Vec::with_capacity(polls.len());
        for poll in polls {
            let options = self.option_repo.find_by_poll(poll.id).await?;
            results.push(PollWithTally {
                tally: tally(&options),
                poll,
            });
        }
        Ok(results)
    }

    /// Record one vote for one option of one poll and return fresh tallies.
    ///
    /// Validation happens in order, before any mutation:
    /// 1. both ids well-formed, else `InvalidRequest`;
    /// 2. poll exists and is active (and not past its expiry), else
    ///    `PollNotActive`; not-found and draft/ended are deliberately
    ///    indistinguishable to the caller;
    /// 3. option exists and belongs to the poll, else `NotFound`.
    ///
    /// The increment itself is a single atomic counter update in the store.
    pub async fn vote(&self, poll_id: i64, option_id: i64) -> AppResult<PollTally> {
        if poll_id <= 0 || option_id <= 0 {
            return Err(AppError::InvalidRequest(
                "pollId and optionId must be positive identifiers".to_string(),
            ));
        }

        let not_active = || AppError::PollNotActive(format!("Poll {poll_id} is not active"));

        let poll = self
            .poll_repo
            .find_by_id(poll_id)
            .await?
            .ok_or_else(not_active)?;
        if poll.status != PollStatus::Active {
            return Err(not_active());
        }
        // An expired poll the sweeper has not yet demoted is closed to votes.
        if let Some(ref expires_at) = poll.expires_at
            && *expires_at < Utc::now()
        {
            return Err(not_active());
        }

        let option = self
            .option_repo
            .find_by_id(option_id)
            .await?
            .filter(|o| o.poll_id == poll_id)
            .ok_or_else(|| {
                AppError::NotFound(format!("Option {option_id} not found for poll {poll_id}"))
            })?;

        let touched = self.option_repo.increment_votes(option.id).await?;
        if touched == 0 {
            return Err(AppError::NotFound(format!(
                "Option {option_id} not found for poll {poll_id}"
            )));
        }

        // Percentages come from a fresh read taken after the increment; two
        // near-simultaneous votes may each see a slightly different snapshot,
        // which is fine for a display aggregate.
        let options = self.option_repo.find_by_poll(poll_id).await?;
        Ok(tally(&options))
    }

    /// Ranked results for the admin view.
    pub async fn results(&self, id: i64) -> AppResult<(PollWithTally, crate::services::Ranking)> {
        let with_tally = self.get(id).await?;
        let ranking = crate::services::rank(&with_tally.tally);
        Ok((with_tally, ranking))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

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

    fn service_with(db: sea_orm::DatabaseConnection) -> PollService {
        let db = Arc::new(db);
        PollService::new(
            PollRepository::new(Arc::clone(&db)),
            PollOptionRepository::new(db),
        )
    }

    #[tokio::test]
    async fn test_vote_increments_and_returns_fresh_tallies() {
        // Poll lookup, option lookup, atomic increment, fresh options read.
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

        let result = service_with(db).vote(1, 11).await.unwrap();

        assert_eq!(result.total_votes, 5);
        assert_eq!(result.options[0].votes, 3);
        assert_eq!(result.options[0].percentage, 60);
        assert_eq!(result.options[1].votes, 2);
        assert_eq!(result.options[1].percentage, 40);
    }

    #[tokio::test]
    async fn test_vote_on_draft_poll_is_rejected_without_mutation() {
        // Only the poll lookup runs; no exec result is consumed.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[mock_poll(1, PollStatus::Draft)]])
            .into_connection();

        let err = service_with(db).vote(1, 11).await.unwrap_err();
        assert!(matches!(err, AppError::PollNotActive(_)));
    }

    #[tokio::test]
    async fn test_vote_on_missing_poll_is_poll_not_active() {
        // "Not found" and "not active" are indistinguishable to the voter.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<poll::Model>::new()])
            .into_connection();

        let err = service_with(db).vote(42, 11).await.unwrap_err();
        assert!(matches!(err, AppError::PollNotActive(_)));
    }

    #[tokio::test]
    async fn test_vote_on_expired_active_poll_is_rejected() {
        let mut poll = mock_poll(1, PollStatus::Active);
        poll.expires_at = Some((Utc::now() - chrono::Duration::hours(1)).into());

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[poll]])
            .into_connection();

        let err = service_with(db).vote(1, 11).await.unwrap_err();
        assert!(matches!(err, AppError::PollNotActive(_)));
    }

    #[tokio::test]
    async fn test_vote_for_option_of_another_poll_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[mock_poll(1, PollStatus::Active)]])
            .append_query_results([[mock_option(11, 2, "Other poll's option", 0, 0)]])
            .into_connection();

        let err = service_with(db).vote(1, 11).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_vote_with_malformed_ids_is_invalid_request() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let err = service_with(db).vote(0, -3).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_list_sweeps_then_annotates_with_tallies() {
        // Sweep exec, poll listing, options per poll.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .append_query_results([[mock_poll(1, PollStatus::Ended)]])
            .append_query_results([[
                mock_option(10, 1, "A", 0, 0),
                mock_option(11, 1, "B", 0, 1),
            ]])
            .into_connection();

        let results = service_with(db).list(&PollFilter::default()).await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].poll.status, PollStatus::Ended);
        // Zero total votes yields all-zero percentages, not an error.
        assert_eq!(results[0].tally.total_votes, 0);
        assert!(results[0].tally.options.iter().all(|o| o.percentage == 0));
    }

    #[tokio::test]
    async fn test_list_ended_only_skips_the_sweep() {
        // No exec result appended: listing ended polls must not sweep.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<poll::Model>::new()])
            .into_connection();

        let filter = PollFilter {
            status: Some(PollStatus::Ended),
            ..PollFilter::default()
        };
        let results = service_with(db).list(&filter).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_fewer_than_two_options() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let err = service_with(db)
            .create(CreatePollInput {
                question: "Lonely poll?".to_string(),
                category: "general".to_string(),
                status: PollStatus::Active,
                expires_at: None,
                featured: false,
                options: vec!["Only choice".to_string()],
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_create_rejects_empty_question() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let err = service_with(db)
            .create(CreatePollInput {
                question: "   ".to_string(),
                category: "general".to_string(),
                status: PollStatus::Draft,
                expires_at: None,
                featured: false,
                options: vec!["Yes".to_string(), "No".to_string()],
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_create_rejects_ended_status() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let err = service_with(db)
            .create(CreatePollInput {
                question: "Posthumous poll?".to_string(),
                category: "general".to_string(),
                status: PollStatus::Ended,
                expires_at: None,
                featured: false,
                options: vec!["Yes".to_string(), "No".to_string()],
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_create_persists_poll_and_options() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[mock_poll(1, PollStatus::Active)]])
            .append_query_results([[mock_option(10, 1, "Yes", 0, 0)]])
            .append_query_results([[mock_option(11, 1, "No", 0, 1)]])
            .into_connection();

        let created = service_with(db)
            .create(CreatePollInput {
                question: "Best headline of the week?".to_string(),
                category: "general".to_string(),
                status: PollStatus::Active,
                expires_at: None,
                featured: false,
                options: vec!["Yes".to_string(), "No".to_string()],
            })
            .await
            .unwrap();

        assert_eq!(created.poll.id, 1);
        assert_eq!(created.tally.total_votes, 0);
        assert_eq!(created.tally.options.len(), 2);
    }

    #[tokio::test]
    async fn test_update_diffs_options_keeping_votes() {
        // Poll lookup, current options, poll update, rename of the kept
        // option, insert of the new option, delete of the omitted option,
        // fresh options read.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[mock_poll(1, PollStatus::Active)]])
            .append_query_results([[
                mock_option(10, 1, "A", 3, 0),
                mock_option(11, 1, "B", 1, 1),
            ]])
            .append_query_results([[mock_poll(1, PollStatus::Active)]])
            .append_query_results([[mock_option(10, 1, "Alpha", 3, 0)]])
            .append_query_results([[mock_option(12, 1, "C", 0, 2)]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .append_query_results([[
                mock_option(10, 1, "Alpha", 3, 0),
                mock_option(12, 1, "C", 0, 2),
            ]])
            .into_connection();

        let updated = service_with(db)
            .update(
                1,
                UpdatePollInput {
                    question: "Best headline of the week?".to_string(),
                    category: "general".to_string(),
                    status: PollStatus::Active,
                    expires_at: None,
                    featured: false,
                    options: vec![
                        PollOptionInput {
                            id: Some(10),
                            text: "Alpha".to_string(),
                        },
                        PollOptionInput {
                            id: None,
                            text: "C".to_string(),
                        },
                    ],
                },
            )
            .await
            .unwrap();

        // The kept option is renamed without losing its votes; the appended
        // option starts at zero after the removed one's position.
        assert_eq!(updated.tally.options.len(), 2);
        assert_eq!(updated.tally.options[0].text, "Alpha");
        assert_eq!(updated.tally.options[0].votes, 3);
        assert_eq!(updated.tally.options[1].text, "C");
        assert_eq!(updated.tally.options[1].votes, 0);
        assert_eq!(updated.tally.total_votes, 3);
        assert_eq!(updated.tally.options[0].percentage, 100);
    }

    #[tokio::test]
    async fn test_update_with_foreign_option_id_is_rejected_before_mutation() {
        // Only the poll and current-options lookups run; no update, insert,
        // or delete statement is issued for an id the poll does not own.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[mock_poll(1, PollStatus::Active)]])
            .append_query_results([[
                mock_option(10, 1, "A", 3, 0),
                mock_option(11, 1, "B", 1, 1),
            ]])
            .into_connection();

        let err = service_with(db)
            .update(
                1,
                UpdatePollInput {
                    question: "Best headline of the week?".to_string(),
                    category: "general".to_string(),
                    status: PollStatus::Active,
                    expires_at: None,
                    featured: false,
                    options: vec![
                        PollOptionInput {
                            id: Some(10),
                            text: "A".to_string(),
                        },
                        PollOptionInput {
                            id: Some(99),
                            text: "Smuggled".to_string(),
                        },
                    ],
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_of_missing_poll_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<poll::Model>::new()])
            .into_connection();

        let err = service_with(db).delete(42).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
