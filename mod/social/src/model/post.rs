use serde::{Deserialize, Serialize};

use crate::model::comment::CommentView;

/// Post — an immutable feed entry at `posts/{postId}`, created once per
/// successful check-in. Later presence changes never edit or retract
/// it; only the owning user may delete it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub user_id: String,
    pub username: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,

    pub venue_id: String,

    /// Venue name copied at creation time, so the post survives catalog
    /// changes unchanged.
    pub venue_name: String,

    pub note: String,

    /// Milliseconds since the Unix epoch, copied from the check-in.
    pub timestamp: i64,
}

/// Assembled client view of a post: the record plus its derived like
/// membership and ordered comments. `like_count` is always the
/// cardinality of `likes` — no independent counter exists anywhere.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    /// Generated post key; feed order is descending by this.
    pub id: String,

    #[serde(flatten)]
    pub post: Post,

    /// User ids that currently like this post, sorted.
    pub likes: Vec<String>,

    pub like_count: usize,

    /// Comments oldest-first (ascending generation key).
    pub comments: Vec<CommentView>,
}
