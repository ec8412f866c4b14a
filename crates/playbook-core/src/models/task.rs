//! Checklist items belonging to a move.

use serde::{Deserialize, Serialize};

/// Evidence attached to a checklist item (a link, a note, or both).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Proof {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Proof {
    /// A proof with neither url nor note carries nothing.
    pub fn is_empty(&self) -> bool {
        self.url.as_deref().is_none_or(str::is_empty)
            && self.note.as_deref().is_none_or(str::is_empty)
    }
}

/// A single day-tagged task of a move.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChecklistItem {
    /// Unique identifier assigned by the store
    pub id: u64,

    /// What to do
    pub text: String,

    /// Whether the task has been checked off
    pub done: bool,

    /// Day of the move (1-based) the task is scheduled on
    pub day: u32,

    /// Estimated effort in minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,

    /// Optional evidence of the work
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof: Option<Proof>,

    /// Position in the generated list (0-indexed)
    pub position: u32,
}

/// A checklist item produced by the move factory, before the store assigns
/// an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChecklistItem {
    pub text: String,
    pub day: u32,
    pub duration_minutes: Option<u32>,
    pub position: u32,
}
