//! Site settings endpoints.

use axum::{Json, Router, extract::State, routing::post};
use newsdesk_common::AppResult;
use newsdesk_core::UpdateSiteSettingsInput;
use newsdesk_db::entities::site_settings;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::{middleware::AppState, response::ApiResponse};

/// Site settings response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettingsResponse {
    pub site_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer_text: Option<String>,
    pub articles_per_page: i32,
    pub ticker_enabled: bool,
    pub social_links: Value,
}

impl From<site_settings::Model> for SiteSettingsResponse {
    fn from(value: site_settings::Model) -> Self {
        Self {
            site_name: value.site_name,
            tagline: value.tagline,
            description: value.description,
            logo_url: value.logo_url,
            contact_email: value.contact_email,
            footer_text: value.footer_text,
            articles_per_page: value.articles_per_page,
            ticker_enabled: value.ticker_enabled,
            social_links: value.social_links,
        }
    }
}

/// Get the site settings.
async fn show_settings(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<SiteSettingsResponse>> {
    let settings = state.settings_service.get().await?;
    Ok(ApiResponse::ok(settings.into()))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/show", post(show_settings))
}

/// Update settings request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    #[validate(length(min = 1, max = 200))]
    pub site_name: String,
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    #[validate(email)]
    pub contact_email: Option<String>,
    pub footer_text: Option<String>,
    pub articles_per_page: i32,
    #[serde(default)]
    pub ticker_enabled: bool,
    #[serde(default = "default_social_links")]
    pub social_links: Value,
}

fn default_social_links() -> Value {
    serde_json::json!({})
}

/// Replace the site settings.
async fn update_settings(
    State(state): State<AppState>,
    Json(req): Json<UpdateSettingsRequest>,
) -> AppResult<ApiResponse<SiteSettingsResponse>> {
    req.validate()?;
    let updated = state
        .settings_service
        .update(UpdateSiteSettingsInput {
            site_name: req.site_name,
            tagline: req.tagline,
            description: req.description,
            logo_url: req.logo_url,
            contact_email: req.contact_email,
            footer_text: req.footer_text,
            articles_per_page: req.articles_per_page,
            ticker_enabled: req.ticker_enabled,
            social_links: req.social_links,
        })
        .await?;
    Ok(ApiResponse::ok(updated.into()))
}

pub fn admin_router() -> Router<AppState> {
    Router::new().route("/update", post(update_settings))
}
