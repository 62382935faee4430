//! Article service.

use chrono::Utc;
use newsdesk_common::{AppError, AppResult};
use newsdesk_db::{
    entities::{article, tag},
    repositories::{
        ArticleFilter, ArticleRepository, CategoryRepository, SubcategoryRepository, TagRepository,
    },
};
use sea_orm::{NotSet, Set};

use crate::services::slug::slugify;

/// Input for creating an article.
#[derive(Debug, Clone)]
pub struct CreateArticleInput {
    pub title: String,
    /// Derived from `title` when absent.
    pub slug: Option<String>,
    pub summary: Option<String>,
    pub body: String,
    pub category_id: i64,
    pub subcategory_id: Option<i64>,
    pub image_url: Option<String>,
    pub featured: bool,
    pub published: bool,
    pub tag_ids: Vec<i64>,
}

/// Input for editing an article.
#[derive(Debug, Clone)]
pub struct UpdateArticleInput {
    pub title: String,
    pub slug: Option<String>,
    pub summary: Option<String>,
    pub body: String,
    pub category_id: i64,
    pub subcategory_id: Option<i64>,
    pub image_url: Option<String>,
    pub featured: bool,
    pub published: bool,
    pub tag_ids: Vec<i64>,
}

/// An article together with its tags.
#[derive(Debug, Clone)]
pub struct ArticleWithTags {
    pub article: article::Model,
    pub tags: Vec<tag::Model>,
}

/// Article service for business logic.
#[derive(Clone)]
pub struct ArticleService {
    article_repo: ArticleRepository,
    category_repo: CategoryRepository,
    subcategory_repo: SubcategoryRepository,
    tag_repo: TagRepository,
}

impl ArticleService {
    /// Create a new article service.
    #[must_use]
    pub const fn new(
        article_repo: ArticleRepository,
        category_repo: CategoryRepository,
        subcategory_repo: SubcategoryRepository,
        tag_repo: TagRepository,
    ) -> Self {
        Self {
            article_repo,
            category_repo,
            subcategory_repo,
            tag_repo,
        }
    }

    fn resolve_slug(title: &str, slug: Option<String>) -> AppResult<String> {
        let slug = match slug {
            Some(s) if !s.trim().is_empty() => slugify(&s),
            _ => slugify(title),
        };
        if slug.is_empty() {
            return Err(AppError::InvalidRequest(
                "Title does not produce a usable slug".to_string(),
            ));
        }
        Ok(slug)
    }

    fn validate_text(title: &str, body: &str) -> AppResult<()> {
        if title.trim().is_empty() {
            return Err(AppError::InvalidRequest(
                "Article title cannot be empty".to_string(),
            ));
        }
        if body.trim().is_empty() {
            return Err(AppError::InvalidRequest(
                "Article body cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Check the category exists and the subcategory, if given, belongs
    /// to it.
    async fn validate_placement(
        &self,
        category_id: i64,
        subcategory_id: Option<i64>,
    ) -> AppResult<()> {
        self.category_repo.get_by_id(category_id).await?;
        if let Some(subcategory_id) = subcategory_id {
            let subcategory = self.subcategory_repo.get_by_id(subcategory_id).await?;
            if subcategory.category_id != category_id {
                return Err(AppError::InvalidRequest(format!(
                    "Subcategory {subcategory_id} does not belong to category {category_id}"
                )));
            }
        }
        Ok(())
    }

    async fn validate_tags(&self, tag_ids: &[i64]) -> AppResult<()> {
        for tag_id in tag_ids {
            self.tag_repo.get_by_id(*tag_id).await?;
        }
        Ok(())
    }

    async fn with_tags(&self, article: article::Model) -> AppResult<ArticleWithTags> {
        let tags = self.article_repo.find_tags(article.id).await?;
        Ok(ArticleWithTags { article, tags })
    }

    /// Create an article.
    pub async fn create(&self, input: CreateArticleInput) -> AppResult<ArticleWithTags> {
        Self::validate_text(&input.title, &input.body)?;
        self.validate_placement(input.category_id, input.subcategory_id)
            .await?;
        self.validate_tags(&input.tag_ids).await?;

        let slug = Self::resolve_slug(&input.title, input.slug)?;
        if self.article_repo.find_by_slug(&slug).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Article slug '{slug}' is already taken"
            )));
        }

        let now = Utc::now();
        let created = self
            .article_repo
            .create(article::ActiveModel {
                id: NotSet,
                title: Set(input.title),
                slug: Set(slug),
                summary: Set(input.summary),
                body: Set(input.body),
                category_id: Set(input.category_id),
                subcategory_id: Set(input.subcategory_id),
                image_url: Set(input.image_url),
                featured: Set(input.featured),
                published: Set(input.published),
                published_at: Set(input.published.then(|| now.into())),
                created_at: Set(now.into()),
                updated_at: Set(None),
            })
            .await?;

        self.article_repo.set_tags(created.id, &input.tag_ids).await?;
        self.with_tags(created).await
    }

    /// Edit an article.
    pub async fn update(&self, id: i64, input: UpdateArticleInput) -> AppResult<ArticleWithTags> {
        Self::validate_text(&input.title, &input.body)?;
        let existing = self.article_repo.get_by_id(id).await?;
        self.validate_placement(input.category_id, input.subcategory_id)
            .await?;
        self.validate_tags(&input.tag_ids).await?;

        let slug = Self::resolve_slug(&input.title, input.slug)?;
        if slug != existing.slug && self.article_repo.find_by_slug(&slug).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Article slug '{slug}' is already taken"
            )));
        }

        let now = Utc::now();
        // First publish stamps published_at; re-publishing keeps the
        // original timestamp.
        let published_at = if input.published {
            existing.published_at.or_else(|| Some(now.into()))
        } else {
            existing.published_at
        };

        let mut model: article::ActiveModel = existing.into();
        model.title = Set(input.title);
        model.slug = Set(slug);
        model.summary = Set(input.summary);
        model.body = Set(input.body);
        model.category_id = Set(input.category_id);
        model.subcategory_id = Set(input.subcategory_id);
        model.image_url = Set(input.image_url);
        model.featured = Set(input.featured);
        model.published = Set(input.published);
        model.published_at = Set(published_at);
        model.updated_at = Set(Some(now.into()));
        let updated = self.article_repo.update(model).await?;

        self.article_repo.set_tags(id, &input.tag_ids).await?;
        self.with_tags(updated).await
    }

    /// Publish or unpublish an article without touching its content.
    ///
    /// The first publish stamps `published_at`; later publishes keep the
    /// original timestamp.
    pub async fn set_published(&self, id: i64, published: bool) -> AppResult<ArticleWithTags> {
        let existing = self.article_repo.get_by_id(id).await?;
        let now = Utc::now();
        let published_at = if published {
            existing.published_at.or_else(|| Some(now.into()))
        } else {
            existing.published_at
        };

        let mut model: article::ActiveModel = existing.into();
        model.published = Set(published);
        model.published_at = Set(published_at);
        model.updated_at = Set(Some(now.into()));
        let updated = self.article_repo.update(model).await?;
        self.with_tags(updated).await
    }

    /// Delete an article.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.article_repo.get_by_id(id).await?;
        self.article_repo.delete(id).await
    }

    /// Get an article by ID.
    pub async fn get(&self, id: i64) -> AppResult<ArticleWithTags> {
        let article = self.article_repo.get_by_id(id).await?;
        self.with_tags(article).await
    }

    /// Get an article by slug, as the public site addresses them.
    pub async fn get_by_slug(&self, slug: &str) -> AppResult<ArticleWithTags> {
        let article = self
            .article_repo
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Article '{slug}' not found")))?;
        self.with_tags(article).await
    }

    /// List articles matching the filter, newest first, with their tags.
    pub async fn list(&self, filter: &ArticleFilter) -> AppResult<Vec<ArticleWithTags>> {
        let articles = self.article_repo.list(filter).await?;
        let mut results = Vec::with_capacity(articles.len());
        for article in articles {
            results.push(self.with_tags(article).await?);
        }
        Ok(results)
    }

    /// Count articles matching the filter, for pagination.
    pub async fn count(&self, filter: &ArticleFilter) -> AppResult<u64> {
        self.article_repo.count(filter).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use newsdesk_db::entities::category;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn service_with(db: sea_orm::DatabaseConnection) -> ArticleService {
        let db = Arc::new(db);
        ArticleService::new(
            ArticleRepository::new(Arc::clone(&db)),
            CategoryRepository::new(Arc::clone(&db)),
            SubcategoryRepository::new(Arc::clone(&db)),
            TagRepository::new(db),
        )
    }

    fn input() -> CreateArticleInput {
        CreateArticleInput {
            title: "Council approves budget".to_string(),
            slug: None,
            summary: None,
            body: "The council voted on Tuesday.".to_string(),
            category_id: 1,
            subcategory_id: None,
            image_url: None,
            featured: false,
            published: true,
            tag_ids: vec![],
        }
    }

    #[tokio::test]
    async fn test_create_with_empty_body_is_invalid_request() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let mut bad = input();
        bad.body = String::new();
        let err = service_with(db).create(bad).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_create_with_missing_category_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<category::Model>::new()])
            .into_connection();

        let err = service_with(db).create(input()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
