//! Tag service.

use chrono::Utc;
use newsdesk_common::{AppError, AppResult};
use newsdesk_db::{entities::tag, repositories::TagRepository};
use sea_orm::{NotSet, Set};

use crate::services::slug::slugify;

/// Tag service for business logic.
#[derive(Clone)]
pub struct TagService {
    tag_repo: TagRepository,
}

impl TagService {
    /// Create a new tag service.
    #[must_use]
    pub const fn new(tag_repo: TagRepository) -> Self {
        Self { tag_repo }
    }

    fn resolve_slug(name: &str, slug: Option<String>) -> AppResult<String> {
        let slug = match slug {
            Some(s) if !s.trim().is_empty() => slugify(&s),
            _ => slugify(name),
        };
        if slug.is_empty() {
            return Err(AppError::InvalidRequest(
                "Name does not produce a usable slug".to_string(),
            ));
        }
        Ok(slug)
    }

    /// List all tags alphabetically.
    pub async fn list(&self) -> AppResult<Vec<tag::Model>> {
        self.tag_repo.find_all().await
    }

    /// Get a tag by ID.
    pub async fn get(&self, id: i64) -> AppResult<tag::Model> {
        self.tag_repo.get_by_id(id).await
    }

    /// Create a tag.
    pub async fn create(&self, name: String, slug: Option<String>) -> AppResult<tag::Model> {
        if name.trim().is_empty() {
            return Err(AppError::InvalidRequest(
                "Tag name cannot be empty".to_string(),
            ));
        }
        let slug = Self::resolve_slug(&name, slug)?;
        if self.tag_repo.find_by_slug(&slug).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Tag slug '{slug}' is already taken"
            )));
        }

        self.tag_repo
            .create(tag::ActiveModel {
                id: NotSet,
                name: Set(name),
                slug: Set(slug),
                created_at: Set(Utc::now().into()),
            })
            .await
    }

    /// Rename a tag.
    pub async fn update(
        &self,
        id: i64,
        name: String,
        slug: Option<String>,
    ) -> AppResult<tag::Model> {
        if name.trim().is_empty() {
            return Err(AppError::InvalidRequest(
                "Tag name cannot be empty".to_string(),
            ));
        }
        let existing = self.tag_repo.get_by_id(id).await?;
        let slug = Self::resolve_slug(&name, slug)?;
        if slug != existing.slug && self.tag_repo.find_by_slug(&slug).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Tag slug '{slug}' is already taken"
            )));
        }

        let mut model: tag::ActiveModel = existing.into();
        model.name = Set(name);
        model.slug = Set(slug);
        self.tag_repo.update(model).await
    }

    /// Delete a tag. Article links are removed by the cascade; articles
    /// themselves are untouched.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.tag_repo.get_by_id(id).await?;
        self.tag_repo.delete(id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn mock_tag(id: i64, name: &str, slug: &str) -> tag::Model {
        tag::Model {
            id,
            name: name.to_string(),
            slug: slug.to_string(),
            created_at: Utc::now().into(),
        }
    }

    fn service_with(db: sea_orm::DatabaseConnection) -> TagService {
        TagService::new(TagRepository::new(Arc::new(db)))
    }

    #[tokio::test]
    async fn test_create_with_taken_slug_is_conflict() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[mock_tag(1, "Breaking", "breaking")]])
            .into_connection();

        let err = service_with(db)
            .create("Breaking".to_string(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_create_derives_slug() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<tag::Model>::new()])
            .append_query_results([[mock_tag(1, "Climate Crisis", "climate-crisis")]])
            .into_connection();

        let created = service_with(db)
            .create("Climate Crisis".to_string(), None)
            .await
            .unwrap();
        assert_eq!(created.slug, "climate-crisis");
    }
}
