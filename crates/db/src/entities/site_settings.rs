//! Site settings entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Site-wide settings, stored as a singleton row.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "site_settings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,

    /// Site name shown in the masthead.
    pub site_name: String,

    #[sea_orm(nullable)]
    pub tagline: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    #[sea_orm(nullable)]
    pub logo_url: Option<String>,

    #[sea_orm(nullable)]
    pub contact_email: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub footer_text: Option<String>,

    /// Articles per listing page on the public site.
    pub articles_per_page: i32,

    /// Whether the breaking-news ticker is shown.
    pub ticker_enabled: bool,

    /// Social media links (JSON object of platform -> URL).
    #[sea_orm(column_type = "JsonBinary")]
    pub social_links: Json,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Fixed ID of the singleton settings row.
pub const SITE_SETTINGS_ID: i32 = 1;
