//! Poll option entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One selectable answer within a poll.
///
/// The `votes` counter only ever increases, by exactly 1 per recorded vote,
/// and is mutated solely through
/// [`PollOptionRepository::increment_votes`](crate::repositories::PollOptionRepository::increment_votes).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "poll_option")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Owning poll.
    #[sea_orm(indexed)]
    pub poll_id: i64,

    pub text: String,

    /// Cumulative vote counter, non-negative.
    pub votes: i64,

    /// Insertion order within the poll; the documented tie-break for display.
    pub position: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::poll::Entity",
        from = "Column::PollId",
        to = "super::poll::Column::Id",
        on_delete = "Cascade"
    )]
    Poll,
}

impl Related<super::poll::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Poll.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
