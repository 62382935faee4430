//! Business logic services.

#![allow(missing_docs)]

pub mod article;
pub mod category;
pub mod poll;
pub mod site_settings;
mod slug;
pub mod tag;
pub mod tally;

pub use article::{ArticleService, ArticleWithTags, CreateArticleInput, UpdateArticleInput};
pub use category::{CategoryService, CreateCategoryInput, CreateSubcategoryInput};
pub use poll::{CreatePollInput, PollOptionInput, PollService, PollWithTally, UpdatePollInput};
pub use site_settings::{SiteSettingsService, UpdateSiteSettingsInput};
pub use tag::TagService;
pub use tally::{OptionTally, PollTally, Ranking, percentage, rank, tally};
