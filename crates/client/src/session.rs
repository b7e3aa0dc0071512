//! Session state: the one live debugging conversation with the backend.
//!
//! The identifier and the source listing are set together by [`Session::open`]
//! and cleared together by [`Session::close`]. Only the dispatcher mutates a
//! session; everything else reads it.

use stepview_common::types::SessionId;
use tracing::{debug, warn};

/// Current session identifier plus the program text fetched at start
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    id: Option<SessionId>,
    source_lines: Vec<String>,
}

impl Session {
    /// A closed session
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a session. An already-open session is silently replaced; only
    /// one session exists per client.
    pub fn open(&mut self, id: SessionId, source_lines: Vec<String>) {
        if let Some(previous) = &self.id {
            warn!(%previous, next = %id, "Replacing an open session");
        }
        debug!(session = %id, lines = source_lines.len(), "Session opened");

        self.id = Some(id);
        self.source_lines = source_lines;
    }

    /// Forget the session and its source listing
    pub fn close(&mut self) {
        if let Some(id) = self.id.take() {
            debug!(session = %id, "Session closed");
        }
        self.source_lines.clear();
    }

    /// Identifier of the open session
    pub fn id(&self) -> Option<&SessionId> {
        self.id.as_ref()
    }

    /// Source listing of the open session; empty when closed
    pub fn source_lines(&self) -> &[String] {
        &self.source_lines
    }

    /// Whether a session is open
    pub fn is_active(&self) -> bool {
        self.id.is_some()
    }
}
