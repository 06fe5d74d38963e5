//! End-to-end flow over a persistent store: check-ins, feed fan-out,
//! likes, comments, deletion, and the published sync snapshot.

use std::sync::Arc;

use barhop_core::{ListParams, ServiceError, UserContext};
use barhop_kv::{KvStore, OverlayKv, RedbStore};
use barhop_live::LiveStore;
use social::catalog;
use social::model::Venue;
use social::service::SocialService;
use social::sync::SyncCoordinator;

fn venues() -> Vec<Venue> {
    vec![
        Venue {
            id: "dt".into(),
            name: "Downtown".into(),
            latitude: 63.4342,
            longitude: 10.3970,
            image: "https://img/dt.jpg".into(),
        },
        Venue {
            id: "tag".into(),
            name: "The Attic".into(),
            latitude: 63.4328,
            longitude: 10.3986,
            image: "https://img/tag.jpg".into(),
        },
    ]
}

fn open_service(path: &std::path::Path) -> Arc<SocialService> {
    let db = RedbStore::open(path).unwrap();
    let overlay = OverlayKv::new(db);
    catalog::install(&venues(), &overlay).unwrap();
    let kv: Arc<dyn KvStore> = Arc::new(overlay);
    Arc::new(SocialService::new(Arc::new(LiveStore::new(kv))))
}

#[test]
fn full_night_out_flow() {
    let dir = tempfile::tempdir().unwrap();
    let svc = open_service(&dir.path().join("flow.redb"));
    let sync = SyncCoordinator::new(svc.clone()).unwrap();

    let alice = UserContext::new("alice", "alice@night.no");
    let bob = UserContext::new("bob", "bob@night.no");

    // Alice checks in; the snapshot already shows it when the call
    // returns.
    svc.check_in("dt", &alice, "drinks at the bar").unwrap();
    let snap = sync.snapshot();
    assert_eq!(snap.posts.len(), 1);
    assert_eq!(snap.posts[0].post.username, "alice");
    assert_eq!(snap.posts[0].post.venue_name, "Downtown");
    assert_eq!(snap.presence["dt"].len(), 1);

    // Bob checks in elsewhere; the feed is newest first.
    svc.check_in("tag", &bob, "rooftop view").unwrap();
    let feed = svc.list_feed(&ListParams::default()).unwrap();
    assert_eq!(feed.total, 2);
    assert_eq!(feed.items[0].post.note, "rooftop view");
    assert_eq!(feed.items[1].post.note, "drinks at the bar");

    // Bob likes and comments on Alice's post.
    let alice_post = feed.items[1].id.clone();
    assert!(svc.toggle_like(&alice_post, "bob").unwrap());
    svc.add_comment(&alice_post, &bob, "save me a seat").unwrap();

    let view = svc.get_post(&alice_post).unwrap();
    assert_eq!(view.likes, vec!["bob".to_string()]);
    assert_eq!(view.comments[0].comment.username, "bob");

    // Bob cannot delete Alice's post; Alice can.
    assert!(matches!(
        svc.delete_post(&alice_post, "bob"),
        Err(ServiceError::PermissionDenied(_))
    ));
    svc.delete_post(&alice_post, "alice").unwrap();

    let snap = sync.snapshot();
    assert_eq!(snap.posts.len(), 1);
    assert_eq!(snap.posts[0].post.user_id, "bob");
    // Alice is still present; deleting a post is not a check-out.
    assert_eq!(snap.presence["dt"].len(), 1);

    // Alice heads home.
    svc.check_out("dt", "alice").unwrap();
    assert!(!sync.snapshot().presence.contains_key("dt"));
}

#[test]
fn presence_and_posts_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("persist.redb");

    {
        let svc = open_service(&path);
        let alice = UserContext::new("alice", "alice@night.no");
        svc.check_in("dt", &alice, "one for the road").unwrap();
    }

    let svc = open_service(&path);
    let sync = SyncCoordinator::new(svc.clone()).unwrap();

    // The initial snapshot is computed from the reopened store.
    let snap = sync.snapshot();
    assert_eq!(snap.posts.len(), 1);
    assert_eq!(snap.posts[0].post.note, "one for the road");
    assert_eq!(snap.presence["dt"][0].user_id, "alice");
}

#[test]
fn venue_catalog_is_readonly_through_the_service_store() {
    let dir = tempfile::tempdir().unwrap();
    let svc = open_service(&dir.path().join("ro.redb"));

    assert!(svc.store().is_readonly("venues/dt"));
    assert!(svc.store().set("venues/dt", b"overwrite").is_err());
    // Presence rows under the same subtree stay writable.
    let alice = UserContext::new("alice", "alice@night.no");
    svc.check_in("dt", &alice, "still open").unwrap();
}
