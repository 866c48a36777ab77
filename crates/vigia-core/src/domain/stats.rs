use serde::Serialize;

use super::post::{Category, PostStatus};

/// Aggregate count and vote sum over a set of posts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostTotals {
    pub posts: u64,
    pub votes: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: Category,
    pub count: u64,
}

/// Public statistics, computed over approved posts only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicStats {
    pub total_posts: u64,
    pub total_votes: i64,
    /// Sorted by count, highest first.
    pub categories: Vec<CategoryCount>,
}

/// Post counts per moderation status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub pending: u64,
    pub approved: u64,
    pub rejected: u64,
    pub total: u64,
}

impl StatusCounts {
    pub fn from_grouped(rows: impl IntoIterator<Item = (PostStatus, u64)>) -> Self {
        rows.into_iter()
            .fold(Self::default(), |mut counts, (status, count)| {
                match status {
                    PostStatus::Pending => counts.pending += count,
                    PostStatus::Approved => counts.approved += count,
                    PostStatus::Rejected => counts.rejected += count,
                }
                counts.total += count;
                counts
            })
    }
}
