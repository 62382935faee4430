//! Site settings repository.

use std::sync::Arc;

use crate::entities::{SiteSettings, site_settings, site_settings::SITE_SETTINGS_ID};
use newsdesk_common::{AppError, AppResult};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use serde_json::json;

/// Repository for the singleton site settings row.
#[derive(Clone)]
pub struct SiteSettingsRepository {
    db: Arc<DatabaseConnection>,
}

impl SiteSettingsRepository {
    /// Create a new site settings repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find the site settings.
    pub async fn find(&self) -> AppResult<Option<site_settings::Model>> {
        SiteSettings::find_by_id(SITE_SETTINGS_ID)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get the site settings, creating the default row if missing.
    pub async fn get_or_create(&self) -> AppResult<site_settings::Model> {
        if let Some(settings) = self.find().await? {
            return Ok(settings);
        }

        let now = chrono::Utc::now();
        let model = site_settings::ActiveModel {
            id: Set(SITE_SETTINGS_ID),
            site_name: Set("Newsdesk".to_string()),
            tagline: Set(None),
            description: Set(None),
            logo_url: Set(None),
            contact_email: Set(None),
            footer_text: Set(None),
            articles_per_page: Set(20),
            ticker_enabled: Set(true),
            social_links: Set(json!({})),
            created_at: Set(now.into()),
            updated_at: Set(None),
        };

        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update the site settings.
    pub async fn update(
        &self,
        model: site_settings::ActiveModel,
    ) -> AppResult<site_settings::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
