//! HTTP API layer for newsdesk.
//!
//! This crate provides the public site API and the admin console API:
//!
//! - **Endpoints**: POST-RPC handlers under `/api`
//! - **Middleware**: Shared application state
//! - **Response**: The standard envelope every handler returns
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod endpoints;
pub mod middleware;
pub mod response;

pub use endpoints::router;
pub use middleware::AppState;
