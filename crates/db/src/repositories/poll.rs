//! Poll repository.

use std::sync::Arc;

use crate::entities::{Poll, PollOption, poll, poll::PollStatus, poll_option};
use chrono::{DateTime, Utc};
use newsdesk_common::{AppError, AppResult};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

/// Filters for poll listings.
#[derive(Debug, Clone, Default)]
pub struct PollFilter {
    /// Restrict to a single status.
    pub status: Option<PollStatus>,
    /// Restrict to a category label.
    pub category: Option<String>,
    /// Restrict to featured (or non-featured) polls.
    pub featured: Option<bool>,
    /// Maximum number of polls returned.
    pub limit: Option<u64>,
}

/// Poll repository for database operations.
#[derive(Clone)]
pub struct PollRepository {
    db: Arc<DatabaseConnection>,
}

impl PollRepository {
    /// Create a new poll repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a poll by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<poll::Model>> {
        Poll::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a poll by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: i64) -> AppResult<poll::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Poll {id} not found")))
    }

    /// List polls matching the filter, newest first.
    pub async fn list(&self, filter: &PollFilter) -> AppResult<Vec<poll::Model>> {
        let mut query = Poll::find();

        if let Some(status) = filter.status {
            query = query.filter(poll::Column::Status.eq(status));
        }
        if let Some(ref category) = filter.category {
            query = query.filter(poll::Column::Category.eq(category.as_str()));
        }
        if let Some(featured) = filter.featured {
            query = query.filter(poll::Column::Featured.eq(featured));
        }
        if let Some(limit) = filter.limit {
            query = query.limit(limit);
        }

        query
            .order_by_desc(poll::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new poll.
    pub async fn create(&self, model: poll::ActiveModel) -> AppResult<poll::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a poll.
    pub async fn update(&self, model: poll::ActiveModel) -> AppResult<poll::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a poll. Options are removed by the `ON DELETE CASCADE` foreign key.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        Poll::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Transition every active poll whose expiry has passed to ended.
    ///
    /// Polls with a null `expires_at` never expire. Returns the number of
    /// polls demoted.
    pub async fn end_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let result = Poll::update_many()
            .col_expr(poll::Column::Status, Expr::value(PollStatus::Ended))
            .filter(poll::Column::Status.eq(PollStatus::Active))
            .filter(poll::Column::ExpiresAt.is_not_null())
            .filter(poll::Column::ExpiresAt.lt(now))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected)
    }
}

/// Poll option repository for database operations.
#[derive(Clone)]
pub struct PollOptionRepository {
    db: Arc<DatabaseConnection>,
}

impl PollOptionRepository {
    /// Create a new poll option repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find an option by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<poll_option::Model>> {
        PollOption::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get all options of a poll in insertion order.
    pub async fn find_by_poll(&self, poll_id: i64) -> AppResult<Vec<poll_option::Model>> {
        PollOption::find()
            .filter(poll_option::Column::PollId.eq(poll_id))
            .order_by_asc(poll_option::Column::Position)
            .order_by_asc(poll_option::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new option.
    pub async fn create(&self, model: poll_option::ActiveModel) -> AppResult<poll_option::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update an option.
    pub async fn update(&self, model: poll_option::ActiveModel) -> AppResult<poll_option::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete options by ID.
    pub async fn delete_many(&self, ids: &[i64]) -> AppResult<()> {
        if ids.is_empty() {
            return Ok(());
        }

        PollOption::delete_many()
            .filter(poll_option::Column::Id.is_in(ids.iter().copied()))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Increment an option's vote counter atomically.
    ///
    /// The increment happens in a single `UPDATE ... SET votes = votes + 1`
    /// statement; the counter is never read-modified-written in application
    /// code, so concurrent votes cannot lose updates. Returns the number of
    /// rows touched (0 when the option no longer exists).
    pub async fn increment_votes(&self, id: i64) -> AppResult<u64> {
        let result = PollOption::update_many()
            .col_expr(
                poll_option::Column::Votes,
                Expr::col(poll_option::Column::Votes).add(1),
            )
            .filter(poll_option::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected)
    }
}
