//! Like toggling — membership rows, never a counter.

use barhop_core::ServiceError;

use super::SocialService;
use crate::keys;
use crate::model::Post;

impl SocialService {
    /// Toggle a user's like on a post. Returns the new state: `true`
    /// if the post is now liked by this user.
    ///
    /// This is a read-then-write against the caller's snapshot, not a
    /// compare-and-swap: two sessions of the same user toggling
    /// concurrently can converge to either state. That matches the
    /// shipped behavior and is accepted.
    pub fn toggle_like(&self, post_id: &str, user_id: &str) -> Result<bool, ServiceError> {
        if user_id.is_empty() {
            return Err(ServiceError::Unauthorized("missing user id".into()));
        }
        if !keys::valid_id(user_id) {
            return Err(ServiceError::Validation(format!(
                "user id {user_id:?} is not a valid path segment"
            )));
        }
        self.require_post(post_id)?;

        let key = keys::like(post_id, user_id);
        let liked = self.store.get(&key).map_err(super::store_err)?.is_some();
        if liked {
            self.store.delete(&key).map_err(super::store_err)?;
            Ok(false)
        } else {
            self.store
                .set(&key, b"true")
                .map_err(super::store_err)?;
            Ok(true)
        }
    }

    /// Number of users currently liking a post — always derived from
    /// the membership set, so it can never drift from it.
    pub fn like_count(&self, post_id: &str) -> Result<usize, ServiceError> {
        self.require_post(post_id)?;
        let members = self
            .store
            .scan(&keys::likes_prefix(post_id))
            .map_err(super::store_err)?;
        Ok(members.len())
    }

    fn require_post(&self, post_id: &str) -> Result<(), ServiceError> {
        let _: Post = self
            .read_json(&keys::post(post_id))?
            .ok_or_else(|| ServiceError::NotFound(format!("post '{post_id}' not found")))?;
        Ok(())
    }
}
