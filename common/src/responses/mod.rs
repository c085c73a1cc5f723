use crate::model::schedule::MatchRecord;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub session_id: Uuid,
    pub matches: Vec<MatchRecord>,
    pub count: usize,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct MatchesResponse {
    pub success: bool,
    pub matches: Vec<MatchRecord>,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Body of every non-PDF failure response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub detail: String,
}

impl ErrorResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            success: false,
            detail: detail.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}
