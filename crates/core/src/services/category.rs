//! Category and subcategory services.

use chrono::Utc;
use newsdesk_common::{AppError, AppResult};
use newsdesk_db::{
    entities::{category, subcategory},
    repositories::{CategoryRepository, SubcategoryRepository},
};
use sea_orm::{NotSet, Set};

use crate::services::slug::slugify;

/// Input for creating or editing a category.
#[derive(Debug, Clone)]
pub struct CreateCategoryInput {
    pub name: String,
    /// Derived from `name` when absent.
    pub slug: Option<String>,
    pub description: Option<String>,
    pub position: i32,
}

/// Input for creating or editing a subcategory.
#[derive(Debug, Clone)]
pub struct CreateSubcategoryInput {
    pub category_id: i64,
    pub name: String,
    pub slug: Option<String>,
}

/// Category service for business logic.
#[derive(Clone)]
pub struct CategoryService {
    category_repo: CategoryRepository,
    subcategory_repo: SubcategoryRepository,
}

impl CategoryService {
    /// Create a new category service.
    #[must_use]
    pub const fn new(
        category_repo: CategoryRepository,
        subcategory_repo: SubcategoryRepository,
    ) -> Self {
        Self {
            category_repo,
            subcategory_repo,
        }
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

    /// List all categories in navigation order.
    pub async fn list(&self) -> AppResult<Vec<category::Model>> {
        self.category_repo.find_all().await
    }

    /// Get a category by ID.
    pub async fn get(&self, id: i64) -> AppResult<category::Model> {
        self.category_repo.get_by_id(id).await
    }

    /// Create a category.
    pub async fn create(&self, input: CreateCategoryInput) -> AppResult<category::Model> {
        if input.name.trim().is_empty() {
            return Err(AppError::InvalidRequest(
                "Category name cannot be empty".to_string(),
            ));
        }
        let slug = Self::resolve_slug(&input.name, input.slug)?;
        if self.category_repo.find_by_slug(&slug).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Category slug '{slug}' is already taken"
            )));
        }

        self.category_repo
            .create(category::ActiveModel {
                id: NotSet,
                name: Set(input.name),
                slug: Set(slug),
                description: Set(input.description),
                position: Set(input.position),
                created_at: Set(Utc::now().into()),
            })
            .await
    }

    /// Edit a category.
    pub async fn update(&self, id: i64, input: CreateCategoryInput) -> AppResult<category::Model> {
        if input.name.trim().is_empty() {
            return Err(AppError::InvalidRequest(
                "Category name cannot be empty".to_string(),
            ));
        }
        let existing = self.category_repo.get_by_id(id).await?;
        let slug = Self::resolve_slug(&input.name, input.slug)?;
        if slug != existing.slug && self.category_repo.find_by_slug(&slug).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Category slug '{slug}' is already taken"
            )));
        }

        let mut model: category::ActiveModel = existing.into();
        model.name = Set(input.name);
        model.slug = Set(slug);
        model.description = Set(input.description);
        model.position = Set(input.position);
        self.category_repo.update(model).await
    }

    /// Delete a category. Subcategories are removed by the cascade and
    /// articles in the category go with it.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.category_repo.get_by_id(id).await?;
        self.category_repo.delete(id).await
    }

    /// List the subcategories of a category.
    pub async fn subcategories(&self, category_id: i64) -> AppResult<Vec<subcategory::Model>> {
        self.category_repo.get_by_id(category_id).await?;
        self.subcategory_repo.find_by_category(category_id).await
    }

    /// Create a subcategory under an existing category.
    pub async fn create_subcategory(
        &self,
        input: CreateSubcategoryInput,
    ) -> AppResult<subcategory::Model> {
        if input.name.trim().is_empty() {
            return Err(AppError::InvalidRequest(
                "Subcategory name cannot be empty".to_string(),
            ));
        }
        self.category_repo.get_by_id(input.category_id).await?;
        let slug = Self::resolve_slug(&input.name, input.slug)?;

        let siblings = self
            .subcategory_repo
            .find_by_category(input.category_id)
            .await?;
        if siblings.iter().any(|s| s.slug == slug) {
            return Err(AppError::Conflict(format!(
                "Subcategory slug '{slug}' is already taken in this category"
            )));
        }

        self.subcategory_repo
            .create(subcategory::ActiveModel {
                id: NotSet,
                category_id: Set(input.category_id),
                name: Set(input.name),
                slug: Set(slug),
                created_at: Set(Utc::now().into()),
            })
            .await
    }

    /// Rename a subcategory.
    pub async fn update_subcategory(
        &self,
        id: i64,
        name: String,
        slug: Option<String>,
    ) -> AppResult<subcategory::Model> {
        if name.trim().is_empty() {
            return Err(AppError::InvalidRequest(
                "Subcategory name cannot be empty".to_string(),
            ));
        }
        let existing = self.subcategory_repo.get_by_id(id).await?;
        let slug = Self::resolve_slug(&name, slug)?;

        if slug != existing.slug {
            let siblings = self
                .subcategory_repo
                .find_by_category(existing.category_id)
                .await?;
            if siblings.iter().any(|s| s.id != id && s.slug == slug) {
                return Err(AppError::Conflict(format!(
                    "Subcategory slug '{slug}' is already taken in this category"
                )));
            }
        }

        let mut model: subcategory::ActiveModel = existing.into();
        model.name = Set(name);
        model.slug = Set(slug);
        self.subcategory_repo.update(model).await
    }

    /// Delete a subcategory. Articles referencing it fall back to the
    /// parent category only.
    pub async fn delete_subcategory(&self, id: i64) -> AppResult<()> {
        self.subcategory_repo.get_by_id(id).await?;
        self.subcategory_repo.delete(id).await
    }
}
