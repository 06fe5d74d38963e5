pub mod checkin;
pub mod comment;
pub mod post;
pub mod venue;

pub use checkin::CheckIn;
pub use comment::{Comment, CommentView};
pub use post::{Post, PostView};
pub use venue::Venue;
