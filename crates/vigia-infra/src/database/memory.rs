//! In-memory post store - used when no database is configured, and in tests.

use std::cmp::Reverse;
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use vigia_core::domain::{Category, Post, PostStatus, PostTotals};
use vigia_core::error::RepoError;
use vigia_core::pagination::{Page, PageRequest};
use vigia_core::ports::{BaseRepository, PostFilter, PostRepository};

/// Post store backed by a `HashMap` behind an async `RwLock`.
///
/// Note: Data is lost on process restart.
#[derive(Default)]
pub struct InMemoryPostRepository {
    store: RwLock<HashMap<Uuid, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        if store.contains_key(&post.id) {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }
        store.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        match store.get_mut(&post.id) {
            Some(existing) => {
                *existing = post.clone();
                Ok(post)
            }
            None => Err(RepoError::NotFound),
        }
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_page(
        &self,
        filter: PostFilter,
        page: PageRequest,
    ) -> Result<Page<Post>, RepoError> {
        let store = self.store.read().await;

        let mut matching: Vec<&Post> = store.values().filter(|p| filter.matches(p)).collect();
        matching.sort_by_key(|p| Reverse((p.created_at, p.id)));

        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
            .take(page.limit() as usize)
            .cloned()
            .collect();

        Ok(Page::new(items, page, total))
    }

    async fn count_by_status(&self) -> Result<Vec<(PostStatus, u64)>, RepoError> {
        let store = self.store.read().await;
        let mut counts: HashMap<PostStatus, u64> = HashMap::new();
        for post in store.values() {
            *counts.entry(post.status).or_default() += 1;
        }
        Ok(counts.into_iter().collect())
    }

    async fn count_by_category(
        &self,
        status: PostStatus,
    ) -> Result<Vec<(Category, u64)>, RepoError> {
        let store = self.store.read().await;
        let mut counts: HashMap<Category, u64> = HashMap::new();
        for post in store.values().filter(|p| p.status == status) {
            *counts.entry(post.category).or_default() += 1;
        }
        Ok(counts.into_iter().collect())
    }

    async fn totals(&self, status: PostStatus) -> Result<PostTotals, RepoError> {
        let store = self.store.read().await;
        Ok(store
            .values()
            .filter(|p| p.status == status)
            .fold(PostTotals::default(), |acc, p| PostTotals {
                posts: acc.posts + 1,
                votes: acc.votes + i64::from(p.votes),
            }))
    }

    async fn ping(&self) -> Result<(), RepoError> {
        Ok(())
    }
}
