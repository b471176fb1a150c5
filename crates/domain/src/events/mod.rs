//! Outcomes of character mutations
//!
//! These enums communicate what happened when character state was modified,
//! allowing callers to react appropriately.

use crate::value_objects::IconRelationship;

/// Outcome of toggling an id in a selection set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added { id: String },
    Removed { id: String },
}

impl ToggleOutcome {
    pub fn is_added(&self) -> bool {
        matches!(self, ToggleOutcome::Added { .. })
    }
}

/// Outcome of setting or clearing an icon relationship
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconRelationshipChange {
    /// Relationship now present with these values
    Set(IconRelationship),
    /// Relationship removed; `previous` is `None` if there was nothing to remove
    Cleared {
        icon_id: String,
        previous: Option<IconRelationship>,
    },
}

/// Outcome of marking a creation step completed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepCompletion {
    Marked,
    AlreadyCompleted,
}
