//! Feed aggregation — immutable posts assembled with their derived
//! like membership and comment streams.

use std::collections::BTreeMap;

use barhop_core::{ListParams, ListResult, ServiceError};
use tracing::{debug, warn};

use super::SocialService;
use crate::keys::{self, PostPath};
use crate::model::{CheckIn, Comment, CommentView, Post, PostView};

impl SocialService {
    /// Fan a check-in out into one immutable feed post. Called from
    /// `check_in` only; the post copies the check-in's identity, note,
    /// and timestamp, plus the venue name at creation time.
    pub(crate) fn append_post(
        &self,
        checkin: &CheckIn,
        venue_name: &str,
    ) -> Result<String, ServiceError> {
        let post = Post {
            user_id: checkin.user_id.clone(),
            username: checkin.username.clone(),
            profile_image: checkin.profile_image.clone(),
            venue_id: checkin.venue_id.clone(),
            venue_name: venue_name.to_string(),
            note: checkin.note.clone(),
            timestamp: checkin.timestamp,
        };
        self.push_json(keys::POSTS, &post)
    }

    /// The whole feed, newest post first.
    ///
    /// Generated post keys sort in creation order, so descending key
    /// order is exactly reverse-chronological — no tiebreak needed.
    pub fn list_feed(&self, params: &ListParams) -> Result<ListResult<PostView>, ServiceError> {
        let views = self.assemble_feed()?;
        Ok(page(views, params))
    }

    /// The feed filtered to one user's posts, newest first.
    pub fn feed_for_user(
        &self,
        user_id: &str,
        params: &ListParams,
    ) -> Result<ListResult<PostView>, ServiceError> {
        let views = self
            .assemble_feed()?
            .into_iter()
            .filter(|v| v.post.user_id == user_id)
            .collect();
        Ok(page(views, params))
    }

    /// A single assembled post view.
    pub fn get_post(&self, post_id: &str) -> Result<PostView, ServiceError> {
        let post: Post = self
            .read_json(&keys::post(post_id))?
            .ok_or_else(|| ServiceError::NotFound(format!("post '{post_id}' not found")))?;

        let mut likes = Vec::new();
        for (path, _) in self
            .store
            .scan(&keys::likes_prefix(post_id))
            .map_err(super::store_err)?
        {
            if let Some(PostPath::Like { user_id, .. }) = keys::parse_post_path(&path) {
                likes.push(user_id.to_string());
            }
        }

        let mut comments = Vec::new();
        for (path, bytes) in self
            .store
            .scan(&keys::comments_prefix(post_id))
            .map_err(super::store_err)?
        {
            if let Some(PostPath::Comment { comment_id, .. }) = keys::parse_post_path(&path) {
                let comment: Comment = serde_json::from_slice(&bytes)
                    .map_err(|e| ServiceError::Internal(e.to_string()))?;
                comments.push(CommentView {
                    id: comment_id.to_string(),
                    comment,
                });
            }
        }

        Ok(PostView {
            id: post_id.to_string(),
            like_count: likes.len(),
            post,
            likes,
            comments,
        })
    }

    /// Delete a post. Only the owning user may delete; the original
    /// check-in row (if still present) is not touched.
    pub fn delete_post(&self, post_id: &str, requester_uid: &str) -> Result<(), ServiceError> {
        let post: Post = self
            .read_json(&keys::post(post_id))?
            .ok_or_else(|| ServiceError::NotFound(format!("post '{post_id}' not found")))?;
        if post.user_id != requester_uid {
            return Err(ServiceError::PermissionDenied(
                "you can only delete your own posts".into(),
            ));
        }

        // Record first: views are keyed off it, so its removal already
        // hides any like/comment rows a crash might strand below.
        self.store
            .delete(&keys::post(post_id))
            .map_err(super::store_err)?;
        let subtree = self
            .store
            .scan(&keys::post_subtree_prefix(post_id))
            .map_err(super::store_err)?;
        for (path, _) in subtree {
            self.store.delete(&path).map_err(super::store_err)?;
        }

        debug!("post {} deleted by {}", post_id, requester_uid);
        Ok(())
    }

    /// One scan of the `posts/` subtree, assembled into views ordered
    /// newest-first.
    pub(crate) fn assemble_feed(&self) -> Result<Vec<PostView>, ServiceError> {
        let entries = self.store.scan(keys::POSTS).map_err(super::store_err)?;

        let mut records: BTreeMap<String, Post> = BTreeMap::new();
        let mut likes: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let mut comments: BTreeMap<String, Vec<CommentView>> = BTreeMap::new();

        for (path, bytes) in entries {
            match keys::parse_post_path(&path) {
                Some(PostPath::Record(id)) => {
                    let post: Post = serde_json::from_slice(&bytes)
                        .map_err(|e| ServiceError::Internal(e.to_string()))?;
                    records.insert(id.to_string(), post);
                }
                Some(PostPath::Like { post_id, user_id }) => {
                    likes
                        .entry(post_id.to_string())
                        .or_default()
                        .push(user_id.to_string());
                }
                Some(PostPath::Comment {
                    post_id,
                    comment_id,
                }) => {
                    let comment: Comment = serde_json::from_slice(&bytes)
                        .map_err(|e| ServiceError::Internal(e.to_string()))?;
                    comments.entry(post_id.to_string()).or_default().push(
                        CommentView {
                            id: comment_id.to_string(),
                            comment,
                        },
                    );
                }
                None => {
                    warn!("skipping malformed post path {}", path);
                }
            }
        }

        // BTreeMap reverse iteration = descending key = newest first.
        // Like and comment rows without a surviving record are orphans
        // from a partial delete; they assemble into nothing.
        Ok(records
            .into_iter()
            .rev()
            .map(|(id, post)| {
                let likes = likes.remove(&id).unwrap_or_default();
                let comments = comments.remove(&id).unwrap_or_default();
                PostView {
                    like_count: likes.len(),
                    id,
                    post,
                    likes,
                    comments,
                }
            })
            .collect())
    }
}

fn page(views: Vec<PostView>, params: &ListParams) -> ListResult<PostView> {
    let total = views.len();
    let items = views
        .into_iter()
        .skip(params.offset)
        .take(params.limit)
        .collect();
    ListResult { items, total }
}
