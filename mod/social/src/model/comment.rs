use serde::{Deserialize, Serialize};

/// Comment — an append-only row at `posts/{postId}/comments/{commentId}`.
/// Immutable once created; no edit or delete path exists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub user_id: String,

    /// Derived from the author's email local part.
    pub username: String,

    pub text: String,

    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

/// A comment together with its generated key. Display order is
/// ascending by `id`, which equals creation order.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: String,

    #[serde(flatten)]
    pub comment: Comment,
}
