use serde::Deserialize;
use uuid::Uuid;

/// Request payload for `POST /api/generate`.
///
/// The plain array form is what the upload page sends. The scoped form pins the
/// request to the upload it was built from, so a request racing a newer upload
/// is rejected instead of silently printing the wrong schedule.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum GenerateRequest {
    Ids(Vec<usize>),
    Scoped {
        session_id: Uuid,
        match_ids: Vec<usize>,
    },
}

impl GenerateRequest {
    pub fn match_ids(&self) -> &[usize] {
        match self {
            GenerateRequest::Ids(ids) => ids,
            GenerateRequest::Scoped { match_ids, .. } => match_ids,
        }
    }

    pub fn session_id(&self) -> Option<Uuid> {
        match self {
            GenerateRequest::Ids(_) => None,
            GenerateRequest::Scoped { session_id, .. } => Some(*session_id),
        }
    }
}

/// Request payload for `POST /api/einsaetze`.
#[derive(Debug, Clone, Deserialize)]
pub struct OverviewRequest {
    pub teams: Vec<String>,
}
