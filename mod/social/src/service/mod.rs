pub mod comment;
pub mod feed;
pub mod like;
pub mod presence;

use std::sync::Arc;

use barhop_core::ServiceError;
use barhop_kv::KvError;
use barhop_live::LiveStore;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::catalog::VenueCatalog;

/// Map a storage-layer error to the service taxonomy at the seam.
pub fn store_err(e: KvError) -> ServiceError {
    match e {
        KvError::ReadOnly(key) => ServiceError::ReadOnly(format!("key is read-only: {key}")),
        KvError::Storage(msg) => ServiceError::Storage(msg),
        KvError::Serialization(msg) => ServiceError::Internal(msg),
    }
}

/// Social service — presence, feed, likes, and comments over one live
/// store. All operations take the acting user explicitly; nothing here
/// reads ambient authentication state.
pub struct SocialService {
    pub(crate) store: Arc<LiveStore>,
    pub(crate) catalog: VenueCatalog,
}

impl SocialService {
    pub fn new(store: Arc<LiveStore>) -> Self {
        let catalog = VenueCatalog::new(store.clone());
        Self { store, catalog }
    }

    pub fn store(&self) -> &Arc<LiveStore> {
        &self.store
    }

    pub fn catalog(&self) -> &VenueCatalog {
        &self.catalog
    }

    // ── JSON record helpers ──

    pub(crate) fn read_json<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Option<T>, ServiceError> {
        match self.store.get(path).map_err(store_err)? {
            Some(bytes) => serde_json::from_slice(&bytes)
                .map(Some)
                .map_err(|e| ServiceError::Internal(e.to_string())),
            None => Ok(None),
        }
    }

    pub(crate) fn write_json<T: Serialize>(
        &self,
        path: &str,
        record: &T,
    ) -> Result<(), ServiceError> {
        let bytes =
            serde_json::to_vec(record).map_err(|e| ServiceError::Internal(e.to_string()))?;
        self.store.set(path, &bytes).map_err(store_err)
    }

    /// Append a record under a generated key, returning the key.
    pub(crate) fn push_json<T: Serialize>(
        &self,
        prefix: &str,
        record: &T,
    ) -> Result<String, ServiceError> {
        let bytes =
            serde_json::to_vec(record).map_err(|e| ServiceError::Internal(e.to_string()))?;
        self.store.push(prefix, &bytes).map_err(store_err)
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    use super::*;
    use barhop_core::UserContext;
    use barhop_kv::{MemStore, OverlayKv};

    use crate::catalog;
    use crate::model::Venue;

    /// Service over an in-memory overlay seeded with two venues,
    /// `1` ("DT") and `2` ("TAG").
    pub fn service() -> Arc<SocialService> {
        let overlay = OverlayKv::new(MemStore::new());
        let venues = vec![
            Venue {
                id: "1".into(),
                name: "DT".into(),
                latitude: 63.4342,
                longitude: 10.3970,
                image: "https://img/dt.jpg".into(),
            },
            Venue {
                id: "2".into(),
                name: "TAG".into(),
                latitude: 63.4328,
                longitude: 10.3986,
                image: "https://img/tag.jpg".into(),
            },
        ];
        catalog::install(&venues, &overlay).unwrap();
        let store = Arc::new(LiveStore::new(Arc::new(overlay)));
        Arc::new(SocialService::new(store))
    }

    pub fn user_a() -> UserContext {
        UserContext::new("ua", "a@x.com")
    }

    pub fn user_b() -> UserContext {
        UserContext::new("ub", "b@x.com")
    }
}
