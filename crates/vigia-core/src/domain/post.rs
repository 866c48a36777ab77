use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

pub const MAX_TITLE_CHARS: usize = 255;
pub const MAX_CONTENT_CHARS: usize = 5000;
pub const MAX_NOTES_CHARS: usize = 500;

/// Label recorded on every moderated post. There is a single shared
/// moderator credential, so no individual identity is available.
pub const MODERATOR_LABEL: &str = "admin";

/// Filter value that disables status/category filtering.
const ALL_FILTER: &str = "all";

/// Report category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    General,
    Gobierno,
    Empresas,
    Educacion,
    Salud,
    Justicia,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::General,
        Category::Gobierno,
        Category::Empresas,
        Category::Educacion,
        Category::Salud,
        Category::Justicia,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::General => "general",
            Category::Gobierno => "gobierno",
            Category::Empresas => "empresas",
            Category::Educacion => "educacion",
            Category::Salud => "salud",
            Category::Justicia => "justicia",
        }
    }

    /// Parse an optional listing filter. Absent, blank or `all` means no filter.
    pub fn parse_filter(value: Option<&str>) -> Result<Option<Self>, DomainError> {
        match value.map(str::trim) {
            None | Some("") | Some(ALL_FILTER) => Ok(None),
            Some(raw) => raw.parse().map(Some),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| DomainError::invalid("category", format!("unknown category '{s}'")))
    }
}

/// Moderation lifecycle state. Only `Approved` posts are publicly visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl PostStatus {
    pub const ALL: [PostStatus; 3] = [PostStatus::Pending, PostStatus::Approved, PostStatus::Rejected];

    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Pending => "pending",
            PostStatus::Approved => "approved",
            PostStatus::Rejected => "rejected",
        }
    }

    /// Parse an optional listing filter. Absent, blank or `all` means no filter.
    pub fn parse_filter(value: Option<&str>) -> Result<Option<Self>, DomainError> {
        match value.map(str::trim) {
            None | Some("") | Some(ALL_FILTER) => Ok(None),
            Some(raw) => raw.parse().map(Some),
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PostStatus::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| DomainError::invalid("status", format!("unknown status '{s}'")))
    }
}

/// Decision a moderator can take on a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerationAction {
    Approve,
    Reject,
}

impl ModerationAction {
    pub fn resulting_status(&self) -> PostStatus {
        match self {
            ModerationAction::Approve => PostStatus::Approved,
            ModerationAction::Reject => PostStatus::Rejected,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModerationAction::Approve => "approve",
            ModerationAction::Reject => "reject",
        }
    }
}

impl FromStr for ModerationAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approve" => Ok(ModerationAction::Approve),
            "reject" => Ok(ModerationAction::Reject),
            other => Err(DomainError::InvalidAction(format!(
                "action must be \"approve\" or \"reject\", got \"{other}\""
            ))),
        }
    }
}

/// Raw report as received from an anonymous submitter.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub link: Option<String>,
}

/// Post entity - a user-submitted report and its moderation state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub category: Category,
    pub link: Option<String>,
    pub votes: i32,
    pub status: PostStatus,
    pub moderated_by: Option<String>,
    pub moderation_date: Option<DateTime<Utc>>,
    pub moderation_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Validate a submission and build a new `Pending` post from it.
    pub fn from_submission(submission: Submission) -> Result<Self, DomainError> {
        let title = required_text("title", submission.title, MAX_TITLE_CHARS)?;
        let content = required_text("content", submission.content, MAX_CONTENT_CHARS)?;

        let category = match submission.category.as_deref().map(str::trim) {
            None | Some("") => Category::default(),
            Some(raw) => raw.parse()?,
        };

        let link = submission
            .link
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty());

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            title,
            content,
            category,
            link,
            votes: 0,
            status: PostStatus::Pending,
            moderated_by: None,
            moderation_date: None,
            moderation_notes: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Record a moderation decision. Any earlier decision is overwritten.
    pub fn apply_moderation(
        &mut self,
        action: ModerationAction,
        notes: String,
        at: DateTime<Utc>,
    ) {
        self.status = action.resulting_status();
        self.moderated_by = Some(MODERATOR_LABEL.to_string());
        self.moderation_date = Some(at);
        self.moderation_notes = Some(notes);
        self.updated_at = at;
    }

    pub fn is_public(&self) -> bool {
        self.status == PostStatus::Approved
    }
}

/// Trim and bound-check moderation notes. Missing notes become an empty
/// string, so every moderated post carries a notes value.
pub fn normalize_notes(notes: Option<&str>) -> Result<String, DomainError> {
    let notes = notes.map(str::trim).unwrap_or_default();
    if notes.chars().count() > MAX_NOTES_CHARS {
        return Err(DomainError::invalid(
            "notes",
            format!("must not exceed {MAX_NOTES_CHARS} characters"),
        ));
    }
    Ok(notes.to_string())
}

fn required_text(
    field: &'static str,
    value: Option<String>,
    max_chars: usize,
) -> Result<String, DomainError> {
    let value = value.as_deref().map(str::trim).unwrap_or_default();
    if value.is_empty() {
        return Err(DomainError::invalid(field, "is required"));
    }
    if value.chars().count() > max_chars {
        return Err(DomainError::invalid(
            field,
            format!("must not exceed {max_chars} characters"),
        ));
    }
    Ok(value.to_string())
}
