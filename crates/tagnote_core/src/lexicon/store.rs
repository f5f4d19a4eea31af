//! User lexicon store: preset tags plus the persisted ranked tag set.
//!
//! # Responsibility
//! - Keep the in-memory authoritative copy of the user's tag set.
//! - Apply the adoption transition (create-or-increment) and persist it.
//! - Provide stable priority ranking for scoring and fallback candidates.
//!
//! # Invariants
//! - Persistence read failure falls back to preset tags; it never aborts
//!   evaluation.
//! - Persistence write failure keeps the in-memory state authoritative for
//!   the rest of the process; the error is returned, not swallowed.
//! - `rank()` is stable across calls for unchanged input.

use crate::lexicon::keywords::PRESET_TAG_NAMES;
use crate::lexicon::repo::{LexiconPersistence, LexiconResult};
use crate::model::tag::{Tag, TagId};
use log::warn;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Returns the stable identity of a preset tag.
///
/// Presets are not persisted until first adoption, so their identity is
/// derived from the name instead of generated per process.
pub fn preset_tag_id(name: &str) -> TagId {
    Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes())
}

/// Current wall-clock time in Unix epoch milliseconds.
pub(crate) fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}

/// In-memory view over the persisted user lexicon.
pub struct LexiconStore {
    persistence: Box<dyn LexiconPersistence>,
    user_tags: Vec<Tag>,
    load_failed: bool,
}

impl LexiconStore {
    /// Opens the store, loading the persisted tag set.
    ///
    /// A read failure is logged and degrades to the preset fallback; the
    /// store stays usable and later adoptions repopulate persistence.
    pub fn open(persistence: Box<dyn LexiconPersistence>) -> Self {
        let (user_tags, load_failed) = match persistence.load() {
            Ok(tags) => (tags, false),
            Err(err) => {
                warn!("event=lexicon_load module=lexicon status=error fallback=presets error={err}");
                (Vec::new(), true)
            }
        };

        Self {
            persistence,
            user_tags,
            load_failed,
        }
    }

    /// Fixed, language-local seed tags. Read-only, stable identity.
    pub fn preset_tags() -> Vec<Tag> {
        PRESET_TAG_NAMES
            .iter()
            .map(|name| Tag::with_id(preset_tag_id(name), *name))
            .collect()
    }

    /// The persisted user tag set, unordered.
    pub fn user_tags(&self) -> &[Tag] {
        &self.user_tags
    }

    /// Applies the adoption transition for `name` and persists the set.
    ///
    /// Creates the tag on first adoption; otherwise increments usage and
    /// recency on the existing record (same id reused). On write failure
    /// the in-memory update is kept and the error is returned to the
    /// caller as a non-fatal event.
    pub fn record_adoption(&mut self, name: &str) -> LexiconResult<()> {
        let now = now_epoch_ms();

        match self.user_tags.iter_mut().find(|tag| tag.name == name) {
            Some(existing) => existing.record_use(now),
            None => {
                let mut created = Tag::new(name);
                created.validate()?;
                created.record_use(now);
                self.user_tags.push(created);
            }
        }

        if let Err(err) = self.persistence.save(&self.user_tags) {
            warn!("event=lexicon_save module=lexicon status=error error={err}");
            return Err(err);
        }

        Ok(())
    }

    /// User tags ordered by priority score descending, ties broken by most
    /// recent `last_used_at`, then by name.
    ///
    /// Falls back to the preset set when the persisted lexicon could not
    /// be read and nothing has been adopted since.
    pub fn rank(&self) -> Vec<Tag> {
        if self.load_failed && self.user_tags.is_empty() {
            return Self::preset_tags();
        }

        let mut ranked = self.user_tags.clone();
        ranked.sort_by(|a, b| {
            b.priority_score()
                .cmp(&a.priority_score())
                .then_with(|| b.last_used_at.cmp(&a.last_used_at))
                .then_with(|| a.name.cmp(&b.name))
        });
        ranked
    }
}
