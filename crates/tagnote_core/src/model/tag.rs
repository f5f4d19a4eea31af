//! Tag domain model.
//!
//! # Responsibility
//! - Define the canonical tag record shared by lexicon and suggestion flows.
//! - Provide lifecycle helpers for the suggested/adopted transition.
//!
//! # Invariants
//! - `uuid` is stable and never reused for another tag.
//! - `name` is unique within a persisted lexicon (enforced by storage).
//! - `usage_count` only increases, and only on adoption.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for every persisted tag.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TagId = Uuid;

/// Suggestion lifecycle state for a tag on the current memo draft.
///
/// `Dismissed` is session-local bookkeeping; it is never persisted on the
/// tag record itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagState {
    /// Proposed by the scoring engine, awaiting user action.
    Suggested,
    /// Attached to the memo draft by user action or auto-adopt policy.
    Adopted,
    /// Explicitly removed for the remainder of the editing session.
    Dismissed,
}

/// Validation error for tag write paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagValidationError {
    /// Tag name is empty or whitespace-only.
    EmptyName,
}

impl Display for TagValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "tag name cannot be empty"),
        }
    }
}

impl Error for TagValidationError {}

/// Canonical tag record.
///
/// The same shape serves preset seed tags, persisted user tags and
/// transient scoring candidates; only persisted records carry meaningful
/// usage history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Stable global ID used for persistence and deduplication.
    pub uuid: TagId,
    /// User-language display name. Unique within the persisted lexicon.
    pub name: String,
    /// Current lifecycle state on the active memo draft.
    pub state: TagState,
    /// Number of adoptions across all sessions. Monotonically increasing.
    pub usage_count: u32,
    /// Unix epoch milliseconds of the most recent adoption.
    pub last_used_at: Option<i64>,
}

impl Tag {
    /// Creates a new tag with a generated stable ID and zero usage history.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name)
    }

    /// Creates a tag with a caller-provided stable ID.
    ///
    /// Used by persistence read paths where identity already exists.
    pub fn with_id(uuid: TagId, name: impl Into<String>) -> Self {
        Self {
            uuid,
            name: name.into(),
            state: TagState::Suggested,
            usage_count: 0,
            last_used_at: None,
        }
    }

    /// Rejects records that must not reach storage or suggestion lists.
    pub fn validate(&self) -> Result<(), TagValidationError> {
        if self.name.trim().is_empty() {
            return Err(TagValidationError::EmptyName);
        }
        Ok(())
    }

    /// Ranking key derived from usage history. Recomputed on read, never
    /// stored.
    pub fn priority_score(&self) -> u32 {
        self.usage_count + u32::from(self.last_used_at.is_some())
    }

    /// Applies the adoption transition: bump usage and recency.
    pub fn record_use(&mut self, now_epoch_ms: i64) {
        self.state = TagState::Adopted;
        self.usage_count += 1;
        self.last_used_at = Some(now_epoch_ms);
    }
}
