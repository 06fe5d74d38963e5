use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get},
};
use serde::Deserialize;

use barhop_core::{ServiceError, UserContext};

use super::{AppState, ok_json};
use crate::model::{CheckIn, Venue};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/venues", get(list_venues))
        .route("/venues/{id}", get(get_venue))
        .route(
            "/venues/{id}/checkins",
            get(list_checkins).put(check_in),
        )
        .route("/venues/{id}/checkins/{uid}", delete(check_out))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CheckInRequest {
    uid: String,
    email: String,
    profile_image: Option<String>,
    note: String,
}

async fn list_venues(State(state): State<AppState>) -> Result<Json<Vec<Venue>>, ServiceError> {
    ok_json(state.service.catalog().list())
}

async fn get_venue(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Venue>, ServiceError> {
    ok_json(state.service.catalog().get(&id))
}

async fn list_checkins(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<CheckIn>>, ServiceError> {
    ok_json(state.service.list_presence(&id))
}

async fn check_in(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<CheckInRequest>,
) -> Result<Json<CheckIn>, ServiceError> {
    let user = UserContext {
        uid: req.uid,
        email: req.email,
        profile_image: req.profile_image,
    };
    ok_json(state.service.check_in(&id, &user, &req.note))
}

async fn check_out(
    State(state): State<AppState>,
    Path((id, uid)): Path<(String, String)>,
) -> Result<Json<()>, ServiceError> {
    ok_json(state.service.check_out(&id, &uid))
}
