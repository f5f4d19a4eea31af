//! Per-draft editing session state.
//!
//! # Responsibility
//! - Track the memo draft's adopted tags, live suggestions, session-local
//!   dismissed names and the current template banner.
//! - Apply the suggested/adopted/dismissed transitions in memory.
//!
//! # Invariants
//! - A name never appears in both `adopted` and `suggestions`.
//! - `dismissed` only grows within a session and is cleared only by a
//!   wholesale text clear.
//! - Nothing here touches persistence; lexicon writes belong to the engine
//!   adoption path.

use crate::model::tag::Tag;
use crate::model::template::{Destination, TemplateSuggestion};
use std::collections::BTreeSet;

/// Mutable state for one active memo draft.
///
/// One instance per editing session, owned by the engine; never a global.
#[derive(Debug)]
pub struct SessionState {
    /// Tags attached to the memo draft, in adoption order.
    pub(crate) adopted: Vec<Tag>,
    /// Current ranked suggestion list.
    pub(crate) suggestions: Vec<Tag>,
    /// Names the user removed this session; suppresses re-suggestion.
    pub(crate) dismissed: BTreeSet<String>,
    /// Current template banner; `empty()` when nothing is surfaced.
    pub(crate) template: TemplateSuggestion,
    /// Destination committed by accept or auto-switch, if any.
    pub(crate) destination: Option<Destination>,
}

impl SessionState {
    pub(crate) fn new() -> Self {
        Self {
            adopted: Vec::new(),
            suggestions: Vec::new(),
            dismissed: BTreeSet::new(),
            template: TemplateSuggestion::empty(),
            destination: None,
        }
    }

    /// Wholesale reset for a cleared draft: everything returns to the
    /// empty state, including the dismissed set.
    pub(crate) fn reset(&mut self) {
        self.adopted.clear();
        self.suggestions.clear();
        self.dismissed.clear();
        self.template = TemplateSuggestion::empty();
        self.destination = None;
    }

    /// Moves the tag's name out of the suggestion list into the adopted
    /// set.
    ///
    /// Returns `true` when the memo set changed. Adopting a name already
    /// on the memo leaves the set unchanged (usage accounting is the
    /// caller's concern).
    pub(crate) fn adopt(&mut self, tag: Tag) -> bool {
        self.suggestions.retain(|candidate| candidate.name != tag.name);
        if self.adopted.iter().any(|existing| existing.name == tag.name) {
            return false;
        }
        self.adopted.push(tag);
        true
    }

    /// Removes `name` from suggestions and the memo set and suppresses it
    /// for the rest of the session.
    pub(crate) fn dismiss(&mut self, name: &str) {
        self.suggestions.retain(|candidate| candidate.name != name);
        self.adopted.retain(|existing| existing.name != name);
        self.dismissed.insert(name.to_string());
    }

    pub(crate) fn adopted_names(&self) -> BTreeSet<String> {
        self.adopted
            .iter()
            .map(|tag| tag.name.clone())
            .collect()
    }
}
