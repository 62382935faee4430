//! Site settings service.

use chrono::Utc;
use newsdesk_common::{AppError, AppResult};
use newsdesk_db::{entities::site_settings, repositories::SiteSettingsRepository};
use sea_orm::Set;
use serde_json::Value;

const MIN_ARTICLES_PER_PAGE: i32 = 1;
const MAX_ARTICLES_PER_PAGE: i32 = 100;

/// Input for editing the site settings.
#[derive(Debug, Clone)]
pub struct UpdateSiteSettingsInput {
    pub site_name: String,
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub contact_email: Option<String>,
    pub footer_text: Option<String>,
    pub articles_per_page: i32,
    pub ticker_enabled: bool,
    /// JSON object of platform name to URL.
    pub social_links: Value,
}

/// Service for the singleton site settings.
#[derive(Clone)]
pub struct SiteSettingsService {
    settings_repo: SiteSettingsRepository,
}

impl SiteSettingsService {
    /// Create a new site settings service.
    #[must_use]
    pub const fn new(settings_repo: SiteSettingsRepository) -> Self {
        Self { settings_repo }
    }

    /// Get the settings, materializing the default row on first access.
    pub async fn get(&self) -> AppResult<site_settings::Model> {
        self.settings_repo.get_or_create().await
    }

    /// Replace the settings.
    pub async fn update(
        &self,
        input: UpdateSiteSettingsInput,
    ) -> AppResult<site_settings::Model> {
        if input.site_name.trim().is_empty() {
            return Err(AppError::InvalidRequest(
                "Site name cannot be empty".to_string(),
            ));
        }
        if !(MIN_ARTICLES_PER_PAGE..=MAX_ARTICLES_PER_PAGE).contains(&input.articles_per_page) {
            return Err(AppError::InvalidRequest(format!(
                "articlesPerPage must be between {MIN_ARTICLES_PER_PAGE} and {MAX_ARTICLES_PER_PAGE}"
            )));
        }
        if !input.social_links.is_object() {
            return Err(AppError::InvalidRequest(
                "socialLinks must be a JSON object".to_string(),
            ));
        }

        let existing = self.settings_repo.get_or_create().await?;
        let mut model: site_settings::ActiveModel = existing.into();
        model.site_name = Set(input.site_name);
        model.tagline = Set(input.tagline);
        model.description = Set(input.description);
        model.logo_url = Set(input.logo_url);
        model.contact_email = Set(input.contact_email);
        model.footer_text = Set(input.footer_text);
        model.articles_per_page = Set(input.articles_per_page);
        model.ticker_enabled = Set(input.ticker_enabled);
        model.social_links = Set(input.social_links);
        model.updated_at = Set(Some(Utc::now().into()));
        self.settings_repo.update(model).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use serde_json::json;
    use std::sync::Arc;

    fn service_with(db: sea_orm::DatabaseConnection) -> SiteSettingsService {
        SiteSettingsService::new(SiteSettingsRepository::new(Arc::new(db)))
    }

    fn valid_input() -> UpdateSiteSettingsInput {
        UpdateSiteSettingsInput {
            site_name: "The Daily Ledger".to_string(),
            tagline: None,
            description: None,
            logo_url: None,
            contact_email: None,
            footer_text: None,
            articles_per_page: 20,
            ticker_enabled: true,
            social_links: json!({}),
        }
    }

    #[tokio::test]
    async fn test_update_rejects_page_size_out_of_range() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let mut input = valid_input();
        input.articles_per_page = 0;
        let err = service_with(db).update(input).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_update_rejects_non_object_social_links() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let mut input = valid_input();
        input.social_links = json!(["not", "an", "object"]);
        let err = service_with(db).update(input).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_update_rejects_empty_site_name() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let mut input = valid_input();
        input.site_name = " ".to_string();
        let err = service_with(db).update(input).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest(_)));
    }
}
