//! Router setup.
//!
//! Builds the axum router with all routes and the shared application state.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::invalidation::CacheInvalidator;
use crate::users::UserService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Cached user lists.
    pub users: UserService,

    /// On-demand cache clearing.
    pub invalidator: Arc<CacheInvalidator>,
}

impl AppState {
    pub fn new(users: UserService, invalidator: Arc<CacheInvalidator>) -> Self {
        Self { users, invalidator }
    }
}

/// Build the router with all routes.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/users/all", get(handlers::all_users))
        .route("/userDetails/all", get(handlers::all_user_details));

    Router::new()
        .route("/clearAllCaches", get(handlers::clear_all_caches))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
