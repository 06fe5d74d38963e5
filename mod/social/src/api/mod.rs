pub mod feed;
pub mod post;
pub mod venue;

use std::sync::Arc;

use axum::{Json, Router};
use serde::Serialize;

use barhop_core::ServiceError;

use crate::service::SocialService;
use crate::sync::SyncCoordinator;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<SocialService>,
    pub sync: Arc<SyncCoordinator>,
}

/// Build the social API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/social/v1", api_routes())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(venue::routes())
        .merge(feed::routes())
        .merge(post::routes())
}

/// Wrap a Result<T, ServiceError> into an API response. ServiceError
/// renders itself as `{"code": ..., "message": ...}` with the matching
/// HTTP status.
pub(crate) fn ok_json<T: Serialize>(
    result: Result<T, ServiceError>,
) -> Result<Json<T>, ServiceError> {
    result.map(Json)
}
