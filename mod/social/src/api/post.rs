use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use barhop_core::{ServiceError, UserContext};

use super::{AppState, ok_json};
use crate::model::{CommentView, PostView};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/posts/{id}", get(get_post).delete(delete_post))
        .route("/posts/{id}/likes/toggle", post(toggle_like))
        .route("/posts/{id}/likes/count", get(like_count))
        .route(
            "/posts/{id}/comments",
            get(list_comments).post(add_comment),
        )
}

#[derive(Deserialize)]
struct ActorQuery {
    uid: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LikeRequest {
    uid: String,
}

#[derive(Serialize)]
struct LikeResponse {
    liked: bool,
}

#[derive(Serialize)]
struct LikeCountResponse {
    count: usize,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentRequest {
    uid: String,
    email: String,
    profile_image: Option<String>,
    text: String,
}

async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PostView>, ServiceError> {
    ok_json(state.service.get_post(&id))
}

async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(actor): Query<ActorQuery>,
) -> Result<Json<()>, ServiceError> {
    ok_json(state.service.delete_post(&id, &actor.uid))
}

async fn toggle_like(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<LikeRequest>,
) -> Result<Json<LikeResponse>, ServiceError> {
    ok_json(
        state
            .service
            .toggle_like(&id, &req.uid)
            .map(|liked| LikeResponse { liked }),
    )
}

async fn like_count(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<LikeCountResponse>, ServiceError> {
    ok_json(
        state
            .service
            .like_count(&id)
            .map(|count| LikeCountResponse { count }),
    )
}

async fn add_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<CommentRequest>,
) -> Result<Json<CommentView>, ServiceError> {
    let user = UserContext {
        uid: req.uid,
        email: req.email,
        profile_image: req.profile_image,
    };
    ok_json(state.service.add_comment(&id, &user, &req.text))
}

async fn list_comments(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<CommentView>>, ServiceError> {
    ok_json(state.service.list_comments(&id))
}
