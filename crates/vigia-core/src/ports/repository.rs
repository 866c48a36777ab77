use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Category, Post, PostStatus, PostTotals};
use crate::error::RepoError;
use crate::pagination::{Page, PageRequest};

/// Generic repository trait for single-entity persistence.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Persist a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Overwrite an existing entity. Fails with `RepoError::NotFound` if absent.
    async fn update(&self, entity: T) -> Result<T, RepoError>;
}

/// Listing filter. `None` means "any".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub status: Option<PostStatus>,
    pub category: Option<Category>,
}

impl PostFilter {
    pub fn matches(&self, post: &Post) -> bool {
        self.status.is_none_or(|s| s == post.status)
            && self.category.is_none_or(|c| c == post.category)
    }
}

/// Post store - the single source of truth for reports.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Posts matching `filter`, newest first.
    async fn find_page(&self, filter: PostFilter, page: PageRequest)
    -> Result<Page<Post>, RepoError>;

    /// Number of posts per status. Statuses with no posts may be omitted.
    async fn count_by_status(&self) -> Result<Vec<(PostStatus, u64)>, RepoError>;

    /// Number of posts per category among posts in `status`.
    async fn count_by_category(&self, status: PostStatus)
    -> Result<Vec<(Category, u64)>, RepoError>;

    /// Post count and vote sum among posts in `status`.
    async fn totals(&self, status: PostStatus) -> Result<PostTotals, RepoError>;

    /// Check that the backing store is reachable.
    async fn ping(&self) -> Result<(), RepoError>;
}
