use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use barhop_kv::{KvError, KvStore, PushIdGen};
use tracing::debug;

use crate::event::{Change, ChangeEvent, SubscriptionId};

/// Callback type for change notifications.
pub type ChangeHandler = Arc<dyn Fn(&ChangeEvent) + Send + Sync>;

struct SubEntry {
    id: SubscriptionId,
    prefix: String,
    handler: ChangeHandler,
}

/// Live view over a KvStore.
///
/// - `get(path)` / `scan(prefix)` read through to the backing store.
/// - `set(path, value)` writes and notifies matching subscriptions.
/// - `delete(path)` removes an existing value and notifies; deleting an
///   absent path is a silent no-op.
/// - `push(prefix, value)` appends under a store-generated key that
///   sorts after every previously generated key.
/// - `subscribe(prefix, handler)` registers a handler for every change
///   under a path prefix; `unsubscribe(id)` releases it.
///
/// Notification is synchronous with the mutating call: when a write
/// returns, every matching handler has already run. Handlers must not
/// write back into the store from inside the callback.
pub struct LiveStore {
    kv: Arc<dyn KvStore>,
    subs: RwLock<Vec<SubEntry>>,
    next_id: AtomicU64,
    ids: PushIdGen,
}

impl LiveStore {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self {
            kv,
            subs: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
            ids: PushIdGen::new(),
        }
    }

    /// Get the value at a path. Returns None if absent.
    pub fn get(&self, path: &str) -> Result<Option<Vec<u8>>, KvError> {
        self.kv.get(path)
    }

    /// Scan all entries under a prefix, sorted by path.
    pub fn scan(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, KvError> {
        self.kv.scan(prefix)
    }

    /// Check whether a path is read-only (seed layer).
    pub fn is_readonly(&self, path: &str) -> bool {
        self.kv.is_readonly(path)
    }

    /// Write a value and notify matching subscriptions.
    pub fn set(&self, path: &str, value: &[u8]) -> Result<(), KvError> {
        self.kv.set(path, value)?;
        self.notify(path, Change::Set);
        Ok(())
    }

    /// Delete the value at a path if present, notifying matching
    /// subscriptions. Absent paths are left untouched and unannounced.
    pub fn delete(&self, path: &str) -> Result<(), KvError> {
        if self.kv.get(path)?.is_none() {
            return Ok(());
        }
        self.kv.delete(path)?;
        self.notify(path, Change::Removed);
        Ok(())
    }

    /// Append a value under `prefix` with a generated key, returning the
    /// key. `prefix` must end with `/`. Generated keys are unique and
    /// sort in creation order, so appends never collide.
    pub fn push(&self, prefix: &str, value: &[u8]) -> Result<String, KvError> {
        let key = self.ids.next();
        let path = format!("{prefix}{key}");
        self.kv.set(&path, value)?;
        self.notify(&path, Change::Set);
        Ok(key)
    }

    /// Subscribe to every change whose path starts with `prefix`.
    ///
    /// Returns a `SubscriptionId` for later `unsubscribe`. The handler
    /// runs on the writing thread, once per change, for the lifetime of
    /// the subscription.
    pub fn subscribe<F>(&self, prefix: &str, handler: F) -> SubscriptionId
    where
        F: Fn(&ChangeEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let mut subs = self.subs.write().unwrap();
        subs.push(SubEntry {
            id,
            prefix: prefix.to_string(),
            handler: Arc::new(handler),
        });
        debug!("subscribed {:?} to prefix {}", id, prefix);
        id
    }

    /// Remove a subscription. Unknown ids are ignored.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        let mut subs = self.subs.write().unwrap();
        subs.retain(|entry| entry.id != id);
    }

    /// Number of active subscriptions.
    pub fn subscription_count(&self) -> usize {
        self.subs.read().unwrap().len()
    }

    fn notify(&self, path: &str, kind: Change) {
        // Collect matching handlers first, then invoke without holding
        // the lock, so a handler may subscribe or unsubscribe.
        let handlers: Vec<ChangeHandler> = {
            let subs = self.subs.read().unwrap();
            subs.iter()
                .filter(|entry| path.starts_with(&entry.prefix))
                .map(|entry| Arc::clone(&entry.handler))
                .collect()
        };
        if handlers.is_empty() {
            return;
        }
        let event = ChangeEvent {
            path: path.to_string(),
            kind,
        };
        for handler in handlers {
            handler(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use barhop_kv::MemStore;

    fn live() -> LiveStore {
        LiveStore::new(Arc::new(MemStore::new()))
    }

    fn record_events(store: &LiveStore, prefix: &str) -> Arc<Mutex<Vec<(String, Change)>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        store.subscribe(prefix, move |ev| {
            sink.lock().unwrap().push((ev.path.clone(), ev.kind));
        });
        seen
    }

    #[test]
    fn set_notifies_matching_prefix() {
        let store = live();
        let seen = record_events(&store, "posts/");

        store.set("posts/a", b"1").unwrap();
        store.set("venues/1", b"x").unwrap();

        let events = seen.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0], ("posts/a".to_string(), Change::Set));
    }

    #[test]
    fn delete_notifies_only_when_present() {
        let store = live();
        let seen = record_events(&store, "posts/");

        store.delete("posts/missing").unwrap();
        store.set("posts/a", b"1").unwrap();
        store.delete("posts/a").unwrap();

        let events = seen.lock().unwrap();
        assert_eq!(
            *events,
            vec![
                ("posts/a".to_string(), Change::Set),
                ("posts/a".to_string(), Change::Removed),
            ]
        );
    }

    #[test]
    fn push_generates_increasing_keys_and_notifies() {
        let store = live();
        let seen = record_events(&store, "posts/p1/comments/");

        let a = store.push("posts/p1/comments/", b"first").unwrap();
        let b = store.push("posts/p1/comments/", b"second").unwrap();
        assert!(b > a);

        let events = seen.lock().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].0, format!("posts/p1/comments/{a}"));

        let entries = store.scan("posts/p1/comments/").unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].1, b"first".to_vec());
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let store = live();
        let seen = Arc::new(Mutex::new(0usize));
        let sink = seen.clone();
        let id = store.subscribe("posts/", move |_| {
            *sink.lock().unwrap() += 1;
        });

        store.set("posts/a", b"1").unwrap();
        store.unsubscribe(id);
        store.set("posts/b", b"2").unwrap();

        assert_eq!(*seen.lock().unwrap(), 1);
        assert_eq!(store.subscription_count(), 0);
    }

    #[test]
    fn notification_is_synchronous_with_write() {
        // A handler reading through the store must see the new value.
        let store = Arc::new(live());
        let observed = Arc::new(Mutex::new(None));
        let sink = observed.clone();
        let reader = store.clone();
        store.subscribe("posts/", move |ev| {
            *sink.lock().unwrap() = reader.get(&ev.path).unwrap();
        });

        store.set("posts/a", b"fresh").unwrap();
        assert_eq!(*observed.lock().unwrap(), Some(b"fresh".to_vec()));
    }

    #[test]
    fn multiple_subscriptions_all_fire() {
        let store = live();
        let a = record_events(&store, "posts/");
        let b = record_events(&store, "posts/p1/");

        store.set("posts/p1/likes/u1", b"true").unwrap();

        assert_eq!(a.lock().unwrap().len(), 1);
        assert_eq!(b.lock().unwrap().len(), 1);
    }
}
