//! Article entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A published or draft news article.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "article")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub title: String,

    /// URL slug, unique across articles.
    #[sea_orm(unique)]
    pub slug: String,

    /// Short summary shown in listings.
    #[sea_orm(column_type = "Text", nullable)]
    pub summary: Option<String>,

    /// Rich content body, stored as-is.
    #[sea_orm(column_type = "Text")]
    pub body: String,

    #[sea_orm(indexed)]
    pub category_id: i64,

    #[sea_orm(indexed, nullable)]
    pub subcategory_id: Option<i64>,

    /// Lead image URL.
    #[sea_orm(nullable)]
    pub image_url: Option<String>,

    /// Shown in the featured slot on the front page.
    pub featured: bool,

    /// Visible to readers.
    pub published: bool,

    #[sea_orm(nullable)]
    pub published_at: Option<DateTimeWithTimeZone>,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id",
        on_delete = "Cascade"
    )]
    Category,

    #[sea_orm(
        belongs_to = "super::subcategory::Entity",
        from = "Column::SubcategoryId",
        to = "super::subcategory::Column::Id",
        on_delete = "SetNull"
    )]
    Subcategory,

    #[sea_orm(has_many = "super::article_tag::Entity")]
    ArticleTag,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::subcategory::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subcategory.def()
    }
}

impl Related<super::article_tag::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ArticleTag.def()
    }
}

impl Related<super::tag::Entity> for Entity {
    fn to() -> RelationDef {
        super::article_tag::Relation::Tag.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::article_tag::Relation::Article.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
