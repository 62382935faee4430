//! API middleware and shared state.

use std::sync::Arc;

use newsdesk_core::{ArticleService, CategoryService, PollService, SiteSettingsService, TagService};
use newsdesk_db::repositories::{
    ArticleRepository, CategoryRepository, PollOptionRepository, PollRepository,
    SiteSettingsRepository, SubcategoryRepository, TagRepository,
};
use sea_orm::DatabaseConnection;

/// Application state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub article_service: ArticleService,
    pub category_service: CategoryService,
    pub poll_service: PollService,
    pub settings_service: SiteSettingsService,
    pub tag_service: TagService,
}

impl AppState {
    /// Wire all services on top of one connection pool.
    #[must_use]
    pub fn from_connection(db: Arc<DatabaseConnection>) -> Self {
        let article_repo = ArticleRepository::new(Arc::clone(&db));
        let category_repo = CategoryRepository::new(Arc::clone(&db));
        let subcategory_repo = SubcategoryRepository::new(Arc::clone(&db));
        let tag_repo = TagRepository::new(Arc::clone(&db));
        let poll_repo = PollRepository::new(Arc::clone(&db));
        let option_repo = PollOptionRepository::new(Arc::clone(&db));
        let settings_repo = SiteSettingsRepository::new(db);

        Self {
            article_service: ArticleService::new(
                article_repo,
                category_repo.clone(),
                subcategory_repo.clone(),
                tag_repo.clone(),
            ),
            category_service: CategoryService::new(category_repo, subcategory_repo),
            poll_service: PollService::new(poll_repo, option_repo),
            settings_service: SiteSettingsService::new(settings_repo),
            tag_service: TagService::new(tag_repo),
        }
    }
}
