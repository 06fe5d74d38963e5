//! Social module — venue check-ins, the live feed, likes, and comments.
//!
//! Write path: a check-in lands at its deterministic presence key and
//! fans out into one immutable feed post under a generated key. Read
//! path: every observing client recomputes its view from the store on
//! each change notification, via [`sync::SyncCoordinator`].

pub mod api;
pub mod catalog;
pub mod keys;
pub mod model;
pub mod service;
pub mod sync;

use std::sync::Arc;

use axum::Router;
use barhop_core::Module;

use service::SocialService;
use sync::SyncCoordinator;

/// Social module — check-in / feed engine plus its HTTP API.
pub struct SocialModule {
    state: api::AppState,
}

impl SocialModule {
    pub fn new(service: Arc<SocialService>, sync: Arc<SyncCoordinator>) -> Self {
        Self {
            state: api::AppState { service, sync },
        }
    }
}

impl Module for SocialModule {
    fn name(&self) -> &str {
        "social"
    }

    fn routes(&self) -> Router {
        api::router(self.state.clone())
    }
}
