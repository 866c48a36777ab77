//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::StringLen;

use vigia_core::domain::{Category, PostStatus};

/// Moderation status column, stored as a short string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum DbStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

/// Category column, stored as a short string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum DbCategory {
    #[sea_orm(string_value = "general")]
    General,
    #[sea_orm(string_value = "gobierno")]
    Gobierno,
    #[sea_orm(string_value = "empresas")]
    Empresas,
    #[sea_orm(string_value = "educacion")]
    Educacion,
    #[sea_orm(string_value = "salud")]
    Salud,
    #[sea_orm(string_value = "justicia")]
    Justicia,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub category: DbCategory,
    #[sea_orm(column_type = "Text", nullable)]
    pub link: Option<String>,
    pub votes: i32,
    pub status: DbStatus,
    pub moderated_by: Option<String>,
    pub moderation_date: Option<DateTimeWithTimeZone>,
    pub moderation_notes: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<PostStatus> for DbStatus {
    fn from(status: PostStatus) -> Self {
        match status {
            PostStatus::Pending => DbStatus::Pending,
            PostStatus::Approved => DbStatus::Approved,
            PostStatus::Rejected => DbStatus::Rejected,
        }
    }
}

impl From<DbStatus> for PostStatus {
    fn from(status: DbStatus) -> Self {
        match status {
            DbStatus::Pending => PostStatus::Pending,
            DbStatus::Approved => PostStatus::Approved,
            DbStatus::Rejected => PostStatus::Rejected,
        }
    }
}

impl From<Category> for DbCategory {
    fn from(category: Category) -> Self {
        match category {
            Category::General => DbCategory::General,
            Category::Gobierno => DbCategory::Gobierno,
            Category::Empresas => DbCategory::Empresas,
            Category::Educacion => DbCategory::Educacion,
            Category::Salud => DbCategory::Salud,
            Category::Justicia => DbCategory::Justicia,
        }
    }
}

impl From<DbCategory> for Category {
    fn from(category: DbCategory) -> Self {
        match category {
            DbCategory::General => Category::General,
            DbCategory::Gobierno => Category::Gobierno,
            DbCategory::Empresas => Category::Empresas,
            DbCategory::Educacion => Category::Educacion,
            DbCategory::Salud => Category::Salud,
            DbCategory::Justicia => Category::Justicia,
        }
    }
}

/// Conversion from SeaORM Model to Domain Post.
impl From<Model> for vigia_core::domain::Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            content: model.content,
            category: model.category.into(),
            link: model.link,
            votes: model.votes,
            status: model.status.into(),
            moderated_by: model.moderated_by,
            moderation_date: model.moderation_date.map(Into::into),
            moderation_notes: model.moderation_notes,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel.
impl From<vigia_core::domain::Post> for ActiveModel {
    fn from(post: vigia_core::domain::Post) -> Self {
        Self {
            id: Set(post.id),
            title: Set(post.title),
            content: Set(post.content),
            category: Set(post.category.into()),
            link: Set(post.link),
            votes: Set(post.votes),
            status: Set(post.status.into()),
            moderated_by: Set(post.moderated_by),
            moderation_date: Set(post.moderation_date.map(Into::into)),
            moderation_notes: Set(post.moderation_notes),
            created_at: Set(post.created_at.into()),
            updated_at: Set(post.updated_at.into()),
        }
    }
}
