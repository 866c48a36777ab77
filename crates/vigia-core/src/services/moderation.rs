use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{
    MODERATOR_LABEL, ModerationAction, Post, PostStatus, StatusCounts, normalize_notes,
};
use crate::error::{DomainError, RepoError};
use crate::pagination::{Page, PageRequest};
use crate::ports::{PostFilter, PostRepository};

/// Moderator-only operations. Callers must have passed the authorization
/// gate before reaching this service.
#[derive(Clone)]
pub struct ModerationService {
    posts: Arc<dyn PostRepository>,
}

impl ModerationService {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }

    /// Posts of any status, newest first. `None`/`all` returns every status.
    pub async fn list(
        &self,
        status: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<Post>, DomainError> {
        let filter = PostFilter {
            status: PostStatus::parse_filter(status)?,
            category: None,
        };
        Ok(self.posts.find_page(filter, page).await?)
    }

    /// Approve or reject a post, overwriting any earlier decision.
    ///
    /// Concurrent decisions on the same post are last-write-wins.
    pub async fn moderate(
        &self,
        post_id: &str,
        action: &str,
        notes: Option<&str>,
    ) -> Result<Post, DomainError> {
        let action: ModerationAction = action.parse()?;
        let notes = normalize_notes(notes)?;
        let id = Uuid::parse_str(post_id.trim())
            .map_err(|_| DomainError::invalid("id", format!("'{post_id}' is not a valid post id")))?;

        let mut post = self
            .posts
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: "Post",
                id,
            })?;

        let previous = post.status;
        post.apply_moderation(action, notes, Utc::now());

        let updated = self.posts.update(post).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::NotFound {
                entity_type: "Post",
                id,
            },
            other => other.into(),
        })?;

        tracing::info!(
            post_id = %updated.id,
            action = action.as_str(),
            from = %previous,
            to = %updated.status,
            moderator = MODERATOR_LABEL,
            "Post moderated"
        );

        Ok(updated)
    }

    /// Post counts grouped by status, including statuses with no posts.
    pub async fn stats(&self) -> Result<StatusCounts, DomainError> {
        let grouped = self.posts.count_by_status().await?;
        Ok(StatusCounts::from_grouped(grouped))
    }
}
