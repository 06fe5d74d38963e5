//! Venue catalog — static reference data seeded from configuration.
//!
//! Venues are installed into the read-only seed layer of an
//! [`OverlayKv`] at startup; any later write or delete against a
//! `venues/{id}` record fails with `ReadOnly`.

use std::path::Path;
use std::sync::Arc;

use barhop_core::ServiceError;
use barhop_kv::{KvStore, OverlayKv};
use barhop_live::LiveStore;
use tracing::debug;

use crate::keys;
use crate::model::Venue;
use crate::service::store_err;

/// Load a venue catalog seed file: a JSON array of venue records.
pub fn load_file(path: &Path) -> Result<Vec<Venue>, ServiceError> {
    let data = std::fs::read(path)
        .map_err(|e| ServiceError::Storage(format!("venue catalog {}: {}", path.display(), e)))?;
    let venues: Vec<Venue> = serde_json::from_slice(&data)
        .map_err(|e| ServiceError::Internal(format!("venue catalog {}: {}", path.display(), e)))?;
    for venue in &venues {
        if !keys::valid_id(&venue.id) {
            return Err(ServiceError::Validation(format!(
                "venue id {:?} is not a valid path segment",
                venue.id
            )));
        }
    }
    Ok(venues)
}

/// Install venues into the overlay's read-only seed layer. Returns the
/// number installed. Must run before the overlay is shared.
pub fn install<DB: KvStore>(
    venues: &[Venue],
    overlay: &OverlayKv<DB>,
) -> Result<usize, ServiceError> {
    for venue in venues {
        let bytes = serde_json::to_vec(venue)
            .map_err(|e| ServiceError::Internal(e.to_string()))?;
        overlay.insert_seed_entry(keys::venue(&venue.id), bytes);
        debug!("installed venue {} ({})", venue.id, venue.name);
    }
    Ok(venues.len())
}

/// Typed read-through view of the installed catalog.
pub struct VenueCatalog {
    store: Arc<LiveStore>,
}

impl VenueCatalog {
    pub fn new(store: Arc<LiveStore>) -> Self {
        Self { store }
    }

    /// Look up a venue by id.
    pub fn get(&self, venue_id: &str) -> Result<Venue, ServiceError> {
        let bytes = self
            .store
            .get(&keys::venue(venue_id))
            .map_err(store_err)?
            .ok_or_else(|| ServiceError::NotFound(format!("venue '{venue_id}' not found")))?;
        serde_json::from_slice(&bytes).map_err(|e| ServiceError::Internal(e.to_string()))
    }

    /// All venues, ordered by id.
    pub fn list(&self) -> Result<Vec<Venue>, ServiceError> {
        let entries = self.store.scan(keys::VENUES).map_err(store_err)?;
        let mut venues = Vec::new();
        for (path, bytes) in entries {
            // Presence rows share the subtree; keep only venue records.
            if !matches!(keys::parse_venue_path(&path), Some(keys::VenuePath::Record(_))) {
                continue;
            }
            let venue: Venue = serde_json::from_slice(&bytes)
                .map_err(|e| ServiceError::Internal(e.to_string()))?;
            venues.push(venue);
        }
        Ok(venues)
    }
}
