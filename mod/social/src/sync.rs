//! Sync coordinator — turns store change notifications into published
//! view snapshots.
//!
//! The coordinator subscribes to the `venues/` and `posts/` subtrees
//! and recomputes the full client view on every change. Recomputation
//! runs synchronously on the writing thread, so by the time a mutating
//! service call returns, the published snapshot already reflects it.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use barhop_core::ServiceError;
use barhop_live::SubscriptionId;
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::keys::{self, VenuePath};
use crate::model::{CheckIn, PostView};
use crate::service::SocialService;

/// One consistent view of the whole social state.
///
/// `revision` increases with every published recomputation; a client
/// holding revision N can discard any snapshot with a lower one.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SyncSnapshot {
    pub revision: u64,
    /// Feed, newest post first.
    pub posts: Vec<PostView>,
    /// Presence rows per venue id. Venues with nobody present are
    /// omitted.
    pub presence: BTreeMap<String, Vec<CheckIn>>,
}

/// Owns the store subscriptions and the published snapshot channel.
///
/// Dropping the coordinator releases its subscriptions; the store
/// keeps working, it just stops driving snapshots.
pub struct SyncCoordinator {
    service: Arc<SocialService>,
    subs: Vec<SubscriptionId>,
    tx: Arc<watch::Sender<SyncSnapshot>>,
}

impl SyncCoordinator {
    pub fn new(service: Arc<SocialService>) -> Result<Self, ServiceError> {
        let initial = compute(&service, 0)?;
        let (tx, _rx) = watch::channel(initial);
        let tx = Arc::new(tx);
        let revision = Arc::new(Mutex::new(0u64));

        let recompute = {
            let service = service.clone();
            let tx = tx.clone();
            move |path: &str| {
                // Revision assignment, recompute, and publish form one
                // critical section. Without it two concurrent writers
                // can publish out of order and the last-published
                // snapshot may predate the other writer's change.
                let mut rev = revision.lock().unwrap();
                *rev += 1;
                match compute(&service, *rev) {
                    Ok(snapshot) => {
                        debug!("published snapshot rev {} after change at {}", *rev, path);
                        // send only fails with no receivers; the
                        // snapshot stays borrowable either way.
                        tx.send_replace(snapshot);
                    }
                    Err(e) => {
                        warn!("snapshot recompute after {} failed: {}", path, e);
                    }
                }
            }
        };

        let store = service.store().clone();
        let subs = [keys::VENUES, keys::POSTS]
            .into_iter()
            .map(|prefix| {
                let recompute = recompute.clone();
                store.subscribe(prefix, move |ev| recompute(&ev.path))
            })
            .collect();

        Ok(Self { service, subs, tx })
    }

    /// The latest published snapshot.
    pub fn snapshot(&self) -> SyncSnapshot {
        self.tx.borrow().clone()
    }

    /// A receiver that observes every future snapshot.
    pub fn watch(&self) -> watch::Receiver<SyncSnapshot> {
        self.tx.subscribe()
    }
}

impl Drop for SyncCoordinator {
    fn drop(&mut self) {
        let store = self.service.store().clone();
        for id in self.subs.drain(..) {
            store.unsubscribe(id);
        }
    }
}

fn compute(service: &SocialService, revision: u64) -> Result<SyncSnapshot, ServiceError> {
    let posts = service.assemble_feed()?;

    let mut presence: BTreeMap<String, Vec<CheckIn>> = BTreeMap::new();
    for (path, bytes) in service
        .store()
        .scan(keys::VENUES)
        .map_err(crate::service::store_err)?
    {
        if let Some(VenuePath::CheckIn { venue_id, .. }) = keys::parse_venue_path(&path) {
            let row: CheckIn = serde_json::from_slice(&bytes)
                .map_err(|e| ServiceError::Internal(e.to_string()))?;
            presence.entry(venue_id.to_string()).or_default().push(row);
        }
    }

    Ok(SyncSnapshot {
        revision,
        posts,
        presence,
    })
}
