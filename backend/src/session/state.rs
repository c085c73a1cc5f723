//! Holds what the operator uploaded.
//!
//! One tournament operator drives the tool, so there is a single current
//! upload. A new upload replaces it wholesale and the last write wins. Each
//! upload gets its own id so a generate request built against an older upload
//! can be recognised and rejected instead of printing reports for the wrong
//! schedule.
//!
//! - `Session`: one immutable upload (matches, roster, template).
//! - `SessionState`: clonable handle injected into the Actix app as `web::Data`.

use crate::error::GenerateError;
use crate::report::Template;
use common::model::roster::Roster;
use common::model::schedule::MatchRecord;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// One uploaded schedule with everything needed to print its reports.
#[derive(Debug)]
pub struct Session {
    pub id: Uuid,
    pub matches: Vec<MatchRecord>,
    pub roster: Roster,
    pub template: Arc<Template>,
}

impl Session {
    pub fn new(matches: Vec<MatchRecord>, roster: Roster, template: Arc<Template>) -> Self {
        Self {
            id: Uuid::new_v4(),
            matches,
            roster,
            template,
        }
    }

    pub fn match_by_id(&self, id: usize) -> Option<&MatchRecord> {
        self.matches.iter().find(|m| m.id == id)
    }
}

#[derive(Clone, Default)]
pub struct SessionState {
    /// Template configured at startup, used when an upload brings none.
    default_template: Arc<RwLock<Option<Arc<Template>>>>,
    current: Arc<RwLock<Option<Arc<Session>>>>,
}

impl SessionState {
    pub fn new(default_template: Option<Template>) -> Self {
        Self {
            default_template: Arc::new(RwLock::new(default_template.map(Arc::new))),
            current: Arc::new(RwLock::new(None)),
        }
    }

    pub async fn default_template(&self) -> Option<Arc<Template>> {
        self.default_template.read().await.clone()
    }

    /// Makes `session` the current upload and returns its id.
    pub async fn replace(&self, session: Session) -> Uuid {
        let id = session.id;
        let previous = self.current.write().await.replace(Arc::new(session));
        if let Some(previous) = previous {
            log::info!("Upload {} replaced by {}", previous.id, id);
        }
        id
    }

    pub async fn current(&self) -> Option<Arc<Session>> {
        self.current.read().await.clone()
    }

    /// The current upload, checked against the id the caller expects if any.
    pub async fn current_for(&self, expected: Option<Uuid>) -> Result<Arc<Session>, GenerateError> {
        let session = self.current().await.ok_or(GenerateError::NoUpload)?;
        match expected {
            Some(requested) if requested != session.id => Err(GenerateError::StaleSession {
                requested,
                current: session.id,
            }),
            _ => Ok(session),
        }
    }
}
