/// What happened to a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// A value was written (created or overwritten).
    Set,
    /// An existing value was deleted.
    Removed,
}

/// A single store change, delivered to matching subscriptions.
#[derive(Debug, Clone)]
pub struct ChangeEvent {
    pub path: String,
    pub kind: Change,
}

/// Unique handle for a subscription, returned by `LiveStore::subscribe()`.
///
/// Use this to unsubscribe later via `LiveStore::unsubscribe()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscription_id_equality_and_hash() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(SubscriptionId(1));
        set.insert(SubscriptionId(2));
        set.insert(SubscriptionId(1));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn change_event_is_cloneable() {
        let ev = ChangeEvent {
            path: "posts/a".into(),
            kind: Change::Set,
        };
        let copy = ev.clone();
        assert_eq!(copy.path, "posts/a");
        assert_eq!(copy.kind, Change::Set);
    }
}
