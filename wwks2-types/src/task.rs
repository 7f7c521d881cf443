//! Task references and descriptors

use std::fmt;

use serde::{Deserialize, Serialize};

/// A task known to the peer
///
/// Requests reference tasks by `Id` alone; responses fill in the reported
/// `Status`. Both map to attributes of a `Task` element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "@Id")]
    pub id: String,

    #[serde(rename = "@Status", skip_serializing_if = "Option::is_none", default)]
    pub status: Option<String>,
}

impl Task {
    /// Reference a task by id (no status)
    pub fn reference(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: None,
        }
    }

    /// Describe a task with its reported status
    pub fn with_status(id: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: Some(status.into()),
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.status {
            Some(status) => write!(f, "Task[{}: {}]", self.id, status),
            None => write!(f, "Task[{}]", self.id),
        }
    }
}
