//! Repository layer.

#![allow(missing_docs)]

pub mod article;
pub mod category;
pub mod poll;
pub mod site_settings;
pub mod tag;

pub use article::{ArticleFilter, ArticleRepository};
pub use category::{CategoryRepository, SubcategoryRepository};
pub use poll::{PollFilter, PollOptionRepository, PollRepository};
pub use site_settings::SiteSettingsRepository;
pub use tag::TagRepository;
