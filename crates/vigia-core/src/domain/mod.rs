//! Domain entities - the core business objects.

mod post;
mod stats;

pub use post::{
    Category, MAX_CONTENT_CHARS, MAX_NOTES_CHARS, MAX_TITLE_CHARS, MODERATOR_LABEL,
    ModerationAction, Post, PostStatus, Submission, normalize_notes,
};
pub use stats::{CategoryCount, PostTotals, PublicStats, StatusCounts};
