//! Presence — who is at which venue right now.

use barhop_core::{ServiceError, UserContext, now_millis};
use tracing::debug;

use super::SocialService;
use crate::keys;
use crate::model::CheckIn;

impl SocialService {
    /// Check a user in at a venue.
    ///
    /// The presence row key is deterministic, so checking in while
    /// already checked in overwrites rather than duplicates — the
    /// at-most-one invariant holds even under concurrent writes from
    /// two devices of the same user. Every successful check-in fans
    /// out exactly one immutable feed post.
    ///
    /// If the presence write succeeds but the post append fails, the
    /// storage error is surfaced and the user is left present without
    /// a feed entry; retrying the whole call is safe because the
    /// overwrite is idempotent.
    pub fn check_in(
        &self,
        venue_id: &str,
        user: &UserContext,
        note: &str,
    ) -> Result<CheckIn, ServiceError> {
        if user.uid.is_empty() {
            return Err(ServiceError::Unauthorized("missing user id".into()));
        }
        if !keys::valid_id(&user.uid) {
            return Err(ServiceError::Validation(format!(
                "user id {:?} is not a valid path segment",
                user.uid
            )));
        }
        let note = note.trim();
        if note.is_empty() {
            return Err(ServiceError::Validation(
                "check-in note cannot be empty".into(),
            ));
        }

        let venue = self.catalog.get(venue_id)?;

        let record = CheckIn {
            venue_id: venue_id.to_string(),
            user_id: user.uid.clone(),
            username: user.username().to_string(),
            profile_image: user.profile_image.clone(),
            note: note.to_string(),
            timestamp: now_millis(),
        };
        self.write_json(&keys::checkin(venue_id, &user.uid), &record)?;

        let post_id = self.append_post(&record, &venue.name)?;
        debug!(
            "user {} checked in at {} (post {})",
            user.uid, venue_id, post_id
        );

        Ok(record)
    }

    /// Check a user out of a venue.
    ///
    /// Deletes the presence row if present; checking out while not
    /// checked in is a silent no-op. The feed post created at check-in
    /// time stays untouched.
    pub fn check_out(&self, venue_id: &str, user_id: &str) -> Result<(), ServiceError> {
        if user_id.is_empty() {
            return Err(ServiceError::Unauthorized("missing user id".into()));
        }
        if !keys::valid_id(user_id) {
            return Err(ServiceError::Validation(format!(
                "user id {user_id:?} is not a valid path segment"
            )));
        }
        self.catalog.get(venue_id)?;
        self.store
            .delete(&keys::checkin(venue_id, user_id))
            .map_err(super::store_err)?;
        debug!("user {} checked out of {}", user_id, venue_id);
        Ok(())
    }

    /// Current presence rows for a venue, ordered by user id.
    pub fn list_presence(&self, venue_id: &str) -> Result<Vec<CheckIn>, ServiceError> {
        self.catalog.get(venue_id)?;
        let entries = self
            .store
            .scan(&keys::checkins_prefix(venue_id))
            .map_err(super::store_err)?;
        let mut rows = Vec::with_capacity(entries.len());
        for (_, bytes) in entries {
            let row: CheckIn = serde_json::from_slice(&bytes)
                .map_err(|e| ServiceError::Internal(e.to_string()))?;
            rows.push(row);
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::testutil::{service, user_a, user_b};

    #[test]
    fn check_in_creates_presence_row_and_post() {
        let svc = service();
        let record = svc.check_in("1", &user_a(), "great vibe").unwrap();
        assert_eq!(record.username, "a");
        assert_eq!(record.note, "great vibe");

        let present = svc.list_presence("1").unwrap();
        assert_eq!(present.len(), 1);
        assert_eq!(present[0].user_id, "ua");

        let feed = svc.assemble_feed().unwrap();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].post.venue_name, "DT");
        assert_eq!(feed[0].post.note, "great vibe");
        assert_eq!(feed[0].post.username, "a");
    }

    #[test]
    fn check_in_trims_note() {
        let svc = service();
        let record = svc.check_in("1", &user_a(), "  lively  ").unwrap();
        assert_eq!(record.note, "lively");
    }

    #[test]
    fn empty_note_is_rejected_before_any_write() {
        let svc = service();
        let err = svc.check_in("1", &user_a(), "   ").unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(svc.list_presence("1").unwrap().is_empty());
        assert!(svc.assemble_feed().unwrap().is_empty());
    }

    #[test]
    fn unknown_venue_is_rejected() {
        let svc = service();
        let err = svc.check_in("99", &user_a(), "hi").unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[test]
    fn missing_uid_is_unauthorized() {
        let svc = service();
        let anon = barhop_core::UserContext::new("", "a@x.com");
        let err = svc.check_in("1", &anon, "hi").unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized(_)));
    }

    #[test]
    fn recheck_in_overwrites_not_duplicates() {
        let svc = service();
        svc.check_in("1", &user_a(), "first").unwrap();
        svc.check_in("1", &user_a(), "second").unwrap();

        let present = svc.list_presence("1").unwrap();
        assert_eq!(present.len(), 1);
        assert_eq!(present[0].note, "second");

        // Each check-in still fans out its own post.
        assert_eq!(svc.assemble_feed().unwrap().len(), 2);
    }

    #[test]
    fn check_out_removes_presence_but_keeps_post() {
        let svc = service();
        svc.check_in("1", &user_a(), "great vibe").unwrap();
        svc.check_out("1", "ua").unwrap();

        assert!(svc.list_presence("1").unwrap().is_empty());
        let feed = svc.assemble_feed().unwrap();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].post.note, "great vibe");
    }

    #[test]
    fn check_out_when_not_checked_in_is_noop() {
        let svc = service();
        assert!(svc.check_out("1", "ua").is_ok());
    }

    #[test]
    fn check_out_rejects_bad_user_ids() {
        let svc = service();
        assert!(matches!(
            svc.check_out("1", ""),
            Err(ServiceError::Unauthorized(_))
        ));
        assert!(matches!(
            svc.check_out("1", "a/b"),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn presence_is_per_venue() {
        let svc = service();
        svc.check_in("1", &user_a(), "here").unwrap();
        svc.check_in("2", &user_b(), "there").unwrap();

        assert_eq!(svc.list_presence("1").unwrap().len(), 1);
        assert_eq!(svc.list_presence("2").unwrap().len(), 1);

        // One user can hold presence at two venues at once.
        svc.check_in("2", &user_a(), "also here").unwrap();
        assert_eq!(svc.list_presence("2").unwrap().len(), 2);
    }
}
