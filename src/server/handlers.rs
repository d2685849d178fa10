//! Request handlers.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::warn;

use super::AppState;
use super::error::AppResult;
use crate::database::UserDetails;
use crate::users::User;

/// `GET /clearAllCaches` - always answers 200.
pub async fn clear_all_caches(State(state): State<AppState>) -> StatusCode {
    if let Err(e) = state.invalidator.evict_all_caches() {
        warn!("On-demand cache clear failed: {:#}", e);
    }
    StatusCode::OK
}

/// `GET /api/users/all`
pub async fn all_users(State(state): State<AppState>) -> AppResult<Json<Arc<Vec<User>>>> {
    let users = state.users.find_all().await?;
    Ok(Json(users))
}

/// `GET /api/userDetails/all`
pub async fn all_user_details(
    State(state): State<AppState>,
) -> AppResult<Json<Arc<Vec<UserDetails>>>> {
    let details = state.users.user_details().await?;
    Ok(Json(details))
}
