//! Poll entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum PollStatus {
    /// Not yet visible to voters.
    #[sea_orm(string_value = "draft")]
    Draft,
    /// Accepting votes.
    #[sea_orm(string_value = "active")]
    Active,
    /// Closed, either explicitly or by expiry.
    #[sea_orm(string_value = "ended")]
    Ended,
}

/// A reader poll with a fixed set of options.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "poll")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    #[sea_orm(column_type = "Text")]
    pub question: String,

    /// Free-form category label for grouping polls.
    pub category: String,

    #[sea_orm(indexed)]
    pub status: PollStatus,

    /// When the poll stops accepting votes (null = never expires).
    #[sea_orm(nullable)]
    pub expires_at: Option<DateTimeWithTimeZone>,

    /// Shown in the featured slot on the front page.
    pub featured: bool,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::poll_option::Entity")]
    PollOption,
}

impl Related<super::poll_option::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PollOption.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
