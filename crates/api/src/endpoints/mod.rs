//! API endpoints.

mod articles;
mod categories;
mod polls;
mod settings;
mod tags;

use axum::Router;

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/polls", polls::router())
        .nest("/articles", articles::router())
        .nest("/categories", categories::router())
        .nest("/tags", tags::router())
        .nest("/settings", settings::router())
        .nest("/admin", admin_router())
}

/// Admin console routes.
fn admin_router() -> Router<AppState> {
    Router::new()
        .nest("/polls", polls::admin_router())
        .nest("/articles", articles::admin_router())
        .nest("/categories", categories::admin_router())
        .nest("/tags", tags::admin_router())
        .nest("/settings", settings::admin_router())
}
