//! Article repository.

use std::sync::Arc;

use crate::entities::{Article, ArticleTag, Tag, article, article_tag, tag};
use newsdesk_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};

/// Filters for article listings.
#[derive(Debug, Clone, Default)]
pub struct ArticleFilter {
    /// Restrict to a category.
    pub category_id: Option<i64>,
    /// Restrict to a subcategory.
    pub subcategory_id: Option<i64>,
    /// Restrict to articles carrying a tag.
    pub tag_id: Option<i64>,
    /// Restrict to featured (or non-featured) articles.
    pub featured: Option<bool>,
    /// Restrict to published (or draft) articles.
    pub published: Option<bool>,
    /// Page size.
    pub limit: u64,
    /// Page offset.
    pub offset: u64,
}

/// Article repository for database operations.
#[derive(Clone)]
pub struct ArticleRepository {
    db: Arc<DatabaseConnection>,
}

impl ArticleRepository {
    /// Create a new article repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find an article by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<article::Model>> {
        Article::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get an article by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: i64) -> AppResult<article::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Article {id} not found")))
    }

    /// Find an article by slug.
    pub async fn find_by_slug(&self, slug: &str) -> AppResult<Option<article::Model>> {
        Article::find()
            .filter(article::Column::Slug.eq(slug))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    fn apply_filter(
        query: sea_orm::Select<Article>,
        filter: &ArticleFilter,
    ) -> sea_orm::Select<Article> {
        let mut query = query;

        if let Some(category_id) = filter.category_id {
            query = query.filter(article::Column::CategoryId.eq(category_id));
        }
        if let Some(subcategory_id) = filter.subcategory_id {
            query = query.filter(article::Column::SubcategoryId.eq(subcategory_id));
        }
        if let Some(featured) = filter.featured {
            query = query.filter(article::Column::Featured.eq(featured));
        }
        if let Some(published) = filter.published {
            query = query.filter(article::Column::Published.eq(published));
        }
        if let Some(tag_id) = filter.tag_id {
            query = query
                .join(JoinType::InnerJoin, article::Relation::ArticleTag.def())
                .filter(article_tag::Column::TagId.eq(tag_id));
        }

        query
    }

    /// List articles matching the filter, newest first.
    pub async fn list(&self, filter: &ArticleFilter) -> AppResult<Vec<article::Model>> {
        Self::apply_filter(Article::find(), filter)
            .order_by_desc(article::Column::CreatedAt)
            .limit(filter.limit)
            .offset(filter.offset)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count articles matching the filter.
    pub async fn count(&self, filter: &ArticleFilter) -> AppResult<u64> {
        Self::apply_filter(Article::find(), filter)
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new article.
    pub async fn create(&self, model: article::ActiveModel) -> AppResult<article::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update an article.
    pub async fn update(&self, model: article::ActiveModel) -> AppResult<article::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete an article. Tag links go with it (cascade).
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        Article::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Get the tags attached to an article.
    pub async fn find_tags(&self, article_id: i64) -> AppResult<Vec<tag::Model>> {
        Tag::find()
            .join(JoinType::InnerJoin, tag::Relation::ArticleTag.def())
            .filter(article_tag::Column::ArticleId.eq(article_id))
            .order_by_asc(tag::Column::Name)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Replace the tag set of an article.
    pub async fn set_tags(&self, article_id: i64, tag_ids: &[i64]) -> AppResult<()> {
        ArticleTag::delete_many()
            .filter(article_tag::Column::ArticleId.eq(article_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if tag_ids.is_empty() {
            return Ok(());
        }

        let links = tag_ids.iter().map(|tag_id| article_tag::ActiveModel {
            article_id: Set(article_id),
            tag_id: Set(*tag_id),
        });

        ArticleTag::insert_many(links)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
