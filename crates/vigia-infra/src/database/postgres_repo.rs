//! PostgreSQL post store.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select,
};

use vigia_core::domain::{Category, Post, PostStatus, PostTotals};
use vigia_core::error::RepoError;
use vigia_core::pagination::{Page, PageRequest};
use vigia_core::ports::{PostFilter, PostRepository};

use super::entity::post::{self, DbCategory, DbStatus, Entity as PostEntity};
use super::postgres_base::{PostgresBaseRepository, repo_error};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

fn filtered(filter: PostFilter) -> Select<PostEntity> {
    let mut query = PostEntity::find();
    if let Some(status) = filter.status {
        query = query.filter(post::Column::Status.eq(DbStatus::from(status)));
    }
    if let Some(category) = filter.category {
        query = query.filter(post::Column::Category.eq(DbCategory::from(category)));
    }
    query
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_page(
        &self,
        filter: PostFilter,
        page: PageRequest,
    ) -> Result<Page<Post>, RepoError> {
        tracing::debug!(?filter, page = page.page(), limit = page.limit(), "Listing posts");

        let total = filtered(filter)
            .count(&self.db)
            .await
            .map_err(repo_error)?;

        if page.offset() >= total {
            return Ok(Page::new(Vec::new(), page, total));
        }

        let models = filtered(filter)
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(Page::new(
            models.into_iter().map(Into::into).collect(),
            page,
            total,
        ))
    }

    async fn count_by_status(&self) -> Result<Vec<(PostStatus, u64)>, RepoError> {
        let rows: Vec<(DbStatus, i64)> = PostEntity::find()
            .select_only()
            .column(post::Column::Status)
            .column_as(Expr::col(post::Column::Id).count(), "total")
            .group_by(post::Column::Status)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(rows
            .into_iter()
            .map(|(status, count)| (status.into(), count.max(0) as u64))
            .collect())
    }

    async fn count_by_category(
        &self,
        status: PostStatus,
    ) -> Result<Vec<(Category, u64)>, RepoError> {
        let rows: Vec<(DbCategory, i64)> = PostEntity::find()
            .filter(post::Column::Status.eq(DbStatus::from(status)))
            .select_only()
            .column(post::Column::Category)
            .column_as(Expr::col(post::Column::Id).count(), "total")
            .group_by(post::Column::Category)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(rows
            .into_iter()
            .map(|(category, count)| (category.into(), count.max(0) as u64))
            .collect())
    }

    async fn totals(&self, status: PostStatus) -> Result<PostTotals, RepoError> {
        let row: Option<(i64, Option<i64>)> = PostEntity::find()
            .filter(post::Column::Status.eq(DbStatus::from(status)))
            .select_only()
            .column_as(Expr::col(post::Column::Id).count(), "posts")
            .column_as(Expr::col(post::Column::Votes).sum(), "votes")
            .into_tuple()
            .one(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(row
            .map(|(posts, votes)| PostTotals {
                posts: posts.max(0) as u64,
                votes: votes.unwrap_or(0),
            })
            .unwrap_or_default())
    }

    async fn ping(&self) -> Result<(), RepoError> {
        self.db.ping().await.map_err(repo_error)
    }
}
