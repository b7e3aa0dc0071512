use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque session identifier issued by the backend on a successful start
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Wrap a backend-issued identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body of the start request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StartRequest {
    /// Name of the program in the backend's catalog
    pub program_name: String,
}

/// Body of every request that acts on an open session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionRequest {
    /// Session to act on
    pub session_id: SessionId,
}
