use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;

use barhop_core::{ListParams, ListResult, ServiceError};

use super::{AppState, ok_json};
use crate::model::PostView;
use crate::sync::SyncSnapshot;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/feed", get(list_feed))
        .route("/feed/sync", get(feed_sync))
}

#[derive(Deserialize)]
struct FeedQuery {
    /// Restrict the feed to one user's posts.
    user: Option<String>,
    limit: Option<usize>,
    offset: Option<usize>,
}

impl FeedQuery {
    fn params(&self) -> ListParams {
        let defaults = ListParams::default();
        ListParams {
            limit: self.limit.unwrap_or(defaults.limit),
            offset: self.offset.unwrap_or(defaults.offset),
        }
    }
}

async fn list_feed(
    State(state): State<AppState>,
    Query(q): Query<FeedQuery>,
) -> Result<Json<ListResult<PostView>>, ServiceError> {
    let params = q.params();
    ok_json(match &q.user {
        Some(user) => state.service.feed_for_user(user, &params),
        None => state.service.list_feed(&params),
    })
}

/// The latest published snapshot: the full feed plus per-venue
/// presence, under one revision number.
async fn feed_sync(State(state): State<AppState>) -> Json<SyncSnapshot> {
    Json(state.sync.snapshot())
}
