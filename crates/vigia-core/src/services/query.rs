use std::sync::Arc;

use crate::domain::{Category, CategoryCount, Post, PostStatus, PublicStats};
use crate::error::DomainError;
use crate::pagination::{Page, PageRequest};
use crate::ports::{PostFilter, PostRepository};

/// Public, unauthenticated read side. Only approved posts are ever visible.
#[derive(Clone)]
pub struct QueryService {
    posts: Arc<dyn PostRepository>,
}

impl QueryService {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }

    /// Approved posts, newest first, optionally restricted to one category.
    pub async fn list_public(
        &self,
        category: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<Post>, DomainError> {
        let filter = PostFilter {
            status: Some(PostStatus::Approved),
            category: Category::parse_filter(category)?,
        };
        Ok(self.posts.find_page(filter, page).await?)
    }

    /// Totals and per-category counts over approved posts.
    pub async fn public_stats(&self) -> Result<PublicStats, DomainError> {
        let totals = self.posts.totals(PostStatus::Approved).await?;

        let mut categories: Vec<CategoryCount> = self
            .posts
            .count_by_category(PostStatus::Approved)
            .await?
            .into_iter()
            .filter(|(_, count)| *count > 0)
            .map(|(category, count)| CategoryCount { category, count })
            .collect();
        categories.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.category.as_str().cmp(b.category.as_str()))
        });

        Ok(PublicStats {
            total_posts: totals.posts,
            total_votes: totals.votes,
            categories,
        })
    }
}
