//! Store path layout.
//!
//! ```text
//! venues/{venueId}                          venue record (read-only seed)
//! venues/{venueId}/checkins/{userId}        presence row, deterministic key
//! posts/{postId}                            feed post, generated key
//! posts/{postId}/likes/{userId}             like membership, deterministic key
//! posts/{postId}/comments/{commentId}       comment, generated key
//! ```
//!
//! Deterministic keys give the at-most-one invariant for check-ins and
//! likes without any locking; generated keys make post and comment
//! appends collision-free.

/// Subtree prefix covering venue records and presence rows.
pub const VENUES: &str = "venues/";

/// Subtree prefix covering posts, likes, and comments.
pub const POSTS: &str = "posts/";

/// An id is usable as a path segment if it is non-empty and contains
/// no separator.
pub fn valid_id(id: &str) -> bool {
    !id.is_empty() && !id.contains('/')
}

pub fn venue(venue_id: &str) -> String {
    format!("venues/{venue_id}")
}

pub fn checkin(venue_id: &str, user_id: &str) -> String {
    format!("venues/{venue_id}/checkins/{user_id}")
}

pub fn checkins_prefix(venue_id: &str) -> String {
    format!("venues/{venue_id}/checkins/")
}

pub fn post(post_id: &str) -> String {
    format!("posts/{post_id}")
}

pub fn post_subtree_prefix(post_id: &str) -> String {
    format!("posts/{post_id}/")
}

pub fn like(post_id: &str, user_id: &str) -> String {
    format!("posts/{post_id}/likes/{user_id}")
}

pub fn likes_prefix(post_id: &str) -> String {
    format!("posts/{post_id}/likes/")
}

pub fn comment(post_id: &str, comment_id: &str) -> String {
    format!("posts/{post_id}/comments/{comment_id}")
}

pub fn comments_prefix(post_id: &str) -> String {
    format!("posts/{post_id}/comments/")
}

/// A parsed path under `posts/`.
#[derive(Debug, PartialEq, Eq)]
pub enum PostPath<'a> {
    Record(&'a str),
    Like { post_id: &'a str, user_id: &'a str },
    Comment { post_id: &'a str, comment_id: &'a str },
}

/// Classify a full store path under the `posts/` subtree. Returns None
/// for paths outside it or with an unexpected shape.
pub fn parse_post_path(path: &str) -> Option<PostPath<'_>> {
    let rest = path.strip_prefix(POSTS)?;
    let mut parts = rest.split('/');
    let post_id = parts.next().filter(|s| !s.is_empty())?;
    match (parts.next(), parts.next(), parts.next()) {
        (None, _, _) => Some(PostPath::Record(post_id)),
        (Some("likes"), Some(user_id), None) if !user_id.is_empty() => {
            Some(PostPath::Like { post_id, user_id })
        }
        (Some("comments"), Some(comment_id), None) if !comment_id.is_empty() => {
            Some(PostPath::Comment {
                post_id,
                comment_id,
            })
        }
        _ => None,
    }
}

/// A parsed path under `venues/`.
#[derive(Debug, PartialEq, Eq)]
pub enum VenuePath<'a> {
    Record(&'a str),
    CheckIn { venue_id: &'a str, user_id: &'a str },
}

/// Classify a full store path under the `venues/` subtree.
pub fn parse_venue_path(path: &str) -> Option<VenuePath<'_>> {
    let rest = path.strip_prefix(VENUES)?;
    let mut parts = rest.split('/');
    let venue_id = parts.next().filter(|s| !s.is_empty())?;
    match (parts.next(), parts.next(), parts.next()) {
        (None, _, _) => Some(VenuePath::Record(venue_id)),
        (Some("checkins"), Some(user_id), None) if !user_id.is_empty() => {
            Some(VenuePath::CheckIn { venue_id, user_id })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_builders() {
        assert_eq!(checkin("1", "u42"), "venues/1/checkins/u42");
        assert_eq!(like("p1", "u42"), "posts/p1/likes/u42");
        assert_eq!(comment("p1", "c9"), "posts/p1/comments/c9");
        assert_eq!(comments_prefix("p1"), "posts/p1/comments/");
    }

    #[test]
    fn valid_id_rejects_separators_and_empty() {
        assert!(valid_id("u42"));
        assert!(!valid_id(""));
        assert!(!valid_id("a/b"));
    }

    #[test]
    fn parse_post_paths() {
        assert_eq!(parse_post_path("posts/p1"), Some(PostPath::Record("p1")));
        assert_eq!(
            parse_post_path("posts/p1/likes/u42"),
            Some(PostPath::Like {
                post_id: "p1",
                user_id: "u42"
            })
        );
        assert_eq!(
            parse_post_path("posts/p1/comments/c9"),
            Some(PostPath::Comment {
                post_id: "p1",
                comment_id: "c9"
            })
        );
    }

    #[test]
    fn parse_post_path_rejects_odd_shapes() {
        assert_eq!(parse_post_path("venues/1"), None);
        assert_eq!(parse_post_path("posts/"), None);
        assert_eq!(parse_post_path("posts/p1/likes"), None);
        assert_eq!(parse_post_path("posts/p1/likes/u1/extra"), None);
        assert_eq!(parse_post_path("posts/p1/unknown/x"), None);
    }

    #[test]
    fn parse_venue_paths() {
        assert_eq!(parse_venue_path("venues/1"), Some(VenuePath::Record("1")));
        assert_eq!(
            parse_venue_path("venues/1/checkins/u42"),
            Some(VenuePath::CheckIn {
                venue_id: "1",
                user_id: "u42"
            })
        );
        assert_eq!(parse_venue_path("venues/1/checkins"), None);
        assert_eq!(parse_venue_path("posts/p1"), None);
    }
}
