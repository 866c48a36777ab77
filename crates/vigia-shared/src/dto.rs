//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Request to submit a new report.
///
/// Every field is optional on the wire so that missing values surface as
/// field-level validation errors. Unknown fields such as `status` or `votes`
/// are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmitPostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub link: Option<String>,
}

/// Request to approve or reject a post.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeratePostRequest {
    pub action: String,
    pub notes: Option<String>,
}

/// Query string for the public listing.
///
/// Pagination values are kept as raw strings; invalid values fall back to
/// defaults instead of failing the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PublicListQuery {
    pub category: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Query string for the moderation listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModerationListQuery {
    pub status: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub pages: u64,
}

/// A page of posts with its pagination metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub posts: Vec<T>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreHealth {
    pub backend: String,
    pub connected: bool,
}

/// Health check payload. Reports whether the moderation secret is set,
/// never its value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
    pub store: StoreHealth,
    pub moderation_configured: bool,
}
