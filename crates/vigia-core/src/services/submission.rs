use std::sync::Arc;

use crate::domain::{Post, Submission};
use crate::error::DomainError;
use crate::ports::PostRepository;

/// Accepts anonymous reports into the moderation queue.
#[derive(Clone)]
pub struct SubmissionService {
    posts: Arc<dyn PostRepository>,
}

impl SubmissionService {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }

    /// Validate and store a report. The stored post is always `Pending`;
    /// nothing is written when validation fails.
    pub async fn submit(&self, submission: Submission) -> Result<Post, DomainError> {
        let post = Post::from_submission(submission)?;
        let saved = self.posts.insert(post).await?;

        tracing::info!(
            post_id = %saved.id,
            category = %saved.category,
            status = %saved.status,
            "New report submitted"
        );

        Ok(saved)
    }
}
