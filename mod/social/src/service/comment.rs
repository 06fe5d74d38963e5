//! Comment log — append-only, ordered by generation key.

use barhop_core::{ServiceError, UserContext, now_millis};
use tracing::debug;

use super::SocialService;
use crate::keys::{self, PostPath};
use crate::model::{Comment, CommentView, Post};

impl SocialService {
    /// Append a comment to a post. Text is trimmed; empty text is
    /// rejected before any write. Comments have no edit or delete.
    pub fn add_comment(
        &self,
        post_id: &str,
        user: &UserContext,
        text: &str,
    ) -> Result<CommentView, ServiceError> {
        if user.uid.is_empty() {
            return Err(ServiceError::Unauthorized("missing user id".into()));
        }
        let text = text.trim();
        if text.is_empty() {
            return Err(ServiceError::Validation("comment cannot be empty".into()));
        }

        let _: Post = self
            .read_json(&keys::post(post_id))?
            .ok_or_else(|| ServiceError::NotFound(format!("post '{post_id}' not found")))?;

        let comment = Comment {
            user_id: user.uid.clone(),
            username: user.username().to_string(),
            text: text.to_string(),
            timestamp: now_millis(),
        };
        let id = self.push_json(&keys::comments_prefix(post_id), &comment)?;
        debug!("comment {} added to post {}", id, post_id);

        Ok(CommentView { id, comment })
    }

    /// Comments for a post, oldest first. Generated keys sort in
    /// creation order, so ascending key order is creation order and is
    /// stable across repeated reads.
    pub fn list_comments(&self, post_id: &str) -> Result<Vec<CommentView>, ServiceError> {
        let _: Post = self
            .read_json(&keys::post(post_id))?
            .ok_or_else(|| ServiceError::NotFound(format!("post '{post_id}' not found")))?;

        let entries = self
            .store
            .scan(&keys::comments_prefix(post_id))
            .map_err(super::store_err)?;
        let mut views = Vec::with_capacity(entries.len());
        for (path, bytes) in entries {
            if let Some(PostPath::Comment { comment_id, .. }) = keys::parse_post_path(&path) {
                let comment: Comment = serde_json::from_slice(&bytes)
                    .map_err(|e| ServiceError::Internal(e.to_string()))?;
                views.push(CommentView {
                    id: comment_id.to_string(),
                    comment,
                });
            }
        }
        Ok(views)
    }
}
