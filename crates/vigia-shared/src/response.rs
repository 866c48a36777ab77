//! Standardized error responses (RFC 7807 problem details).

use serde::{Deserialize, Serialize};

/// Machine-readable error category, one per failure class of the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidInput,
    InvalidAction,
    Unauthorized,
    Forbidden,
    NotFound,
    ServerMisconfigured,
    InternalError,
}

impl ErrorCode {
    pub fn status(&self) -> u16 {
        match self {
            ErrorCode::InvalidInput | ErrorCode::InvalidAction => 400,
            ErrorCode::Unauthorized => 401,
            ErrorCode::Forbidden => 403,
            ErrorCode::NotFound => 404,
            ErrorCode::ServerMisconfigured | ErrorCode::InternalError => 500,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ErrorCode::InvalidInput => "Invalid Input",
            ErrorCode::InvalidAction => "Invalid Action",
            ErrorCode::Unauthorized => "Unauthorized",
            ErrorCode::Forbidden => "Forbidden",
            ErrorCode::NotFound => "Not Found",
            ErrorCode::ServerMisconfigured => "Server Misconfigured",
            ErrorCode::InternalError => "Internal Server Error",
        }
    }
}

/// RFC 7807 Problem Details for HTTP APIs, plus a stable `code`.
///
/// See: https://datatracker.ietf.org/doc/html/rfc7807
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// A URI reference that identifies the problem type.
    #[serde(rename = "type")]
    pub error_type: String,

    /// Machine-readable error category.
    pub code: ErrorCode,

    /// A short, human-readable summary of the problem type.
    pub title: String,

    /// The HTTP status code.
    pub status: u16,

    /// A human-readable explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode) -> Self {
        Self {
            error_type: "about:blank".to_string(),
            code,
            title: code.title().to_string(),
            status: code.status(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}
