//! Database entities.

#![allow(missing_docs)]

pub mod article;
pub mod article_tag;
pub mod category;
pub mod poll;
pub mod poll_option;
pub mod site_settings;
pub mod subcategory;
pub mod tag;

pub use article::Entity as Article;
pub use article_tag::Entity as ArticleTag;
pub use category::Entity as Category;
pub use poll::Entity as Poll;
pub use poll_option::Entity as PollOption;
pub use site_settings::Entity as SiteSettings;
pub use subcategory::Entity as Subcategory;
pub use tag::Entity as Tag;
