//! Template suggestion value types.
//!
//! # Responsibility
//! - Define the task/note classification result shared by the template
//!   scorer and the engine observables.
//! - Own the fixed record-kind to destination mapping.
//!
//! # Invariants
//! - `confidence` is always within `[0, 1]`.
//! - `empty()` is the canonical zero value: unknown kind, zero confidence.

use serde::{Deserialize, Serialize};

/// Confidence at or above this value gates auto-acceptance.
pub const CONFIDENCE_GATE: f64 = 0.6;

/// Resolved record category for a memo draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// Actionable item with an implied completion.
    Task,
    /// Reflective or free-form content.
    Note,
    /// Nothing decidable from the current text.
    Unknown,
}

/// External sink a finished memo is forwarded to.
///
/// The sinks themselves live outside this core; only the fixed
/// kind-to-destination mapping is owned here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    /// Task-oriented destination (task tracker, todo list).
    TaskTracker,
    /// Note-oriented destination. Harmless default for unknown input.
    Notebook,
}

impl RecordKind {
    /// Fixed mapping from resolved kind to forwarding destination.
    pub fn destination(self) -> Destination {
        match self {
            Self::Task => Destination::TaskTracker,
            Self::Note | Self::Unknown => Destination::Notebook,
        }
    }
}

/// Classification outcome with a normalized confidence.
///
/// Not persisted; recomputed for every settled evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemplateSuggestion {
    /// Resolved classification.
    pub kind: RecordKind,
    /// Normalized score in `[0, 1]` expressing how much to trust `kind`.
    pub confidence: f64,
    /// Destination implied by `kind`.
    pub destination: Destination,
}

impl TemplateSuggestion {
    /// Canonical zero value: unknown kind, zero confidence.
    pub fn empty() -> Self {
        Self::for_kind(RecordKind::Unknown, 0.0)
    }

    /// Builds a suggestion with the destination derived from `kind`.
    pub fn for_kind(kind: RecordKind, confidence: f64) -> Self {
        Self {
            kind,
            confidence,
            destination: kind.destination(),
        }
    }

    /// Whether the classification clears the auto-acceptance gate.
    pub fn is_confident(&self) -> bool {
        self.confidence >= CONFIDENCE_GATE
    }

    /// Whether this is the zero value.
    pub fn is_empty(&self) -> bool {
        self.kind == RecordKind::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::{Destination, RecordKind, TemplateSuggestion};

    #[test]
    fn empty_suggestion_is_unknown_with_zero_confidence() {
        let empty = TemplateSuggestion::empty();
        assert!(empty.is_empty());
        assert_eq!(empty.confidence, 0.0);
        assert_eq!(empty.destination, Destination::Notebook);
        assert!(!empty.is_confident());
    }

    #[test]
    fn confidence_gate_is_inclusive_at_the_boundary() {
        let below = TemplateSuggestion::for_kind(RecordKind::Task, 0.599);
        let at = TemplateSuggestion::for_kind(RecordKind::Task, 0.600);
        assert!(!below.is_confident());
        assert!(at.is_confident());
    }

    #[test]
    fn destination_mapping_is_fixed() {
        assert_eq!(RecordKind::Task.destination(), Destination::TaskTracker);
        assert_eq!(RecordKind::Note.destination(), Destination::Notebook);
        assert_eq!(RecordKind::Unknown.destination(), Destination::Notebook);
    }
}
