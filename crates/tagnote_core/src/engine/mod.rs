//! Debounced evaluation engine and suggestion state machine.
//!
//! # Responsibility
//! - Coalesce text-change bursts and run both scoring engines at most once
//!   per settled input.
//! - Own the per-draft suggestion lifecycle: adopt, dismiss, accept,
//!   wholesale reset.
//! - Publish suggestion state through observable channels, decoupled from
//!   any UI binding.
//!
//! # Invariants
//! - Only the evaluation belonging to the newest generation may commit;
//!   superseded evaluations exit without side effects.
//! - The lexicon is written only from the adoption path; scoring reads
//!   cloned snapshots and holds no lock across an await point.
//! - Empty/whitespace input resets the session synchronously and starts
//!   no settle timer.

mod session;

use crate::lexicon::repo::LexiconResult;
use crate::lexicon::store::LexiconStore;
use crate::model::policy::{TagPolicy, TemplatePolicy};
use crate::model::tag::Tag;
use crate::model::template::{Destination, TemplateSuggestion};
use crate::score::tag::{score_tags, TagScoreRequest};
use crate::score::template::score_template;
use crate::signal::LinguisticAnalyzer;
use log::{debug, warn};
use self::session::SessionState;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::watch;

/// Settle window for tag scoring.
pub const DEFAULT_TAG_SETTLE: Duration = Duration::from_millis(200);
/// Settle window for template scoring.
pub const DEFAULT_TEMPLATE_SETTLE: Duration = Duration::from_millis(300);

/// Engine configuration, consumed at construction.
///
/// Policies arrive from an external settings store; malformed raw values
/// should be normalized with the `from_config_value` parsers before they
/// reach this struct.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub tag_policy: TagPolicy,
    pub template_policy: TemplatePolicy,
    pub tag_settle: Duration,
    pub template_settle: Duration,
    /// Locale handed to the linguistic analyzer verbatim.
    pub locale: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tag_policy: TagPolicy::default(),
            template_policy: TemplatePolicy::default(),
            tag_settle: DEFAULT_TAG_SETTLE,
            template_settle: DEFAULT_TEMPLATE_SETTLE,
            locale: "ja".to_string(),
        }
    }
}

/// Evaluation lifecycle counters, for diagnostics and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineStats {
    /// Evaluations spawned after a non-empty text change.
    pub evaluations_started: u64,
    /// Evaluations that survived their settle window and committed.
    pub evaluations_committed: u64,
    /// Evaluations discarded because a newer generation superseded them.
    pub evaluations_discarded: u64,
}

struct EngineInner {
    config: EngineConfig,
    analyzer: Arc<dyn LinguisticAnalyzer>,
    lexicon: Mutex<LexiconStore>,
    session: Mutex<SessionState>,
    /// Monotonically increasing evaluation generation. Owned exclusively
    /// by `on_text_changed`; evaluation tasks only read it.
    generation: AtomicU64,
    tag_tx: watch::Sender<Vec<Tag>>,
    template_tx: watch::Sender<TemplateSuggestion>,
    started: AtomicU64,
    committed: AtomicU64,
    discarded: AtomicU64,
}

impl EngineInner {
    fn is_stale(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) != generation
    }

    fn discard(&self, kind: &str, generation: u64) {
        self.discarded.fetch_add(1, Ordering::Relaxed);
        debug!("event=evaluation module=engine status=discard kind={kind} generation={generation}");
    }

    /// Runs the adoption transition for `name` while the session lock is
    /// held: create-or-increment in the lexicon, then attach the persisted
    /// record to the memo draft.
    ///
    /// A persistence write failure is returned after the in-memory state
    /// is already updated; it never rolls the adoption back.
    fn adopt_locked(&self, session: &mut SessionState, name: &str) -> LexiconResult<()> {
        let (persist_result, record) = {
            let mut lexicon = lock_or_recover(&self.lexicon);
            let persist_result = lexicon.record_adoption(name);
            let record = lexicon
                .user_tags()
                .iter()
                .find(|tag| tag.name == name)
                .cloned();
            (persist_result, record)
        };

        if let Some(record) = record {
            session.adopt(record);
        }
        self.tag_tx.send_replace(session.suggestions.clone());

        persist_result
    }
}

/// Mutex poisoning cannot corrupt suggestion state (all writes are
/// whole-value replacements), so a poisoned lock is recovered rather than
/// propagated.
fn lock_or_recover<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Debounced text-classification engine for one memo draft.
///
/// The sole scheduling entry point is [`on_text_changed`]; results are
/// published asynchronously through the watch observables. Construction
/// and method calls must happen inside a Tokio runtime.
///
/// [`on_text_changed`]: SuggestionEngine::on_text_changed
#[derive(Clone)]
pub struct SuggestionEngine {
    inner: Arc<EngineInner>,
}

impl SuggestionEngine {
    /// Builds an engine over an opened lexicon store and an analyzer.
    pub fn new(
        lexicon: LexiconStore,
        analyzer: Arc<dyn LinguisticAnalyzer>,
        config: EngineConfig,
    ) -> Self {
        let (tag_tx, _) = watch::channel(Vec::new());
        let (template_tx, _) = watch::channel(TemplateSuggestion::empty());

        Self {
            inner: Arc::new(EngineInner {
                config,
                analyzer,
                lexicon: Mutex::new(lexicon),
                session: Mutex::new(SessionState::new()),
                generation: AtomicU64::new(0),
                tag_tx,
                template_tx,
                started: AtomicU64::new(0),
                committed: AtomicU64::new(0),
                discarded: AtomicU64::new(0),
            }),
        }
    }

    /// Receives one text-change event and schedules re-evaluation.
    ///
    /// Never blocks. A burst of calls within the settle window results in
    /// exactly one committed evaluation, for the newest text. Clearing the
    /// text resets the whole session synchronously and starts no timer.
    pub fn on_text_changed(&self, text: &str) {
        let inner = &self.inner;
        let generation = inner.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let trimmed = text.trim();
        if trimmed.is_empty() {
            let mut session = lock_or_recover(&inner.session);
            session.reset();
            inner.tag_tx.send_replace(Vec::new());
            inner.template_tx.send_replace(TemplateSuggestion::empty());
            debug!("event=evaluation module=engine status=reset generation={generation}");
            return;
        }

        let snapshot = trimmed.to_string();
        if inner.config.tag_policy != TagPolicy::Off {
            Self::spawn_tag_evaluation(Arc::clone(inner), snapshot.clone(), generation);
        }
        if inner.config.template_policy != TemplatePolicy::Off {
            Self::spawn_template_evaluation(Arc::clone(inner), snapshot, generation);
        }
    }

    /// Adopts `name` onto the memo draft (user action or manual entry).
    ///
    /// Always records usage in the lexicon, including repeat adoptions of
    /// an already-attached name. A persistence failure is surfaced in the
    /// result; in-memory state is updated regardless.
    pub fn adopt(&self, name: &str) -> LexiconResult<()> {
        let mut session = lock_or_recover(&self.inner.session);
        self.inner.adopt_locked(&mut session, name)
    }

    /// Removes `name` from the draft and suppresses it for this session.
    ///
    /// Usage counters are never decremented on removal.
    pub fn dismiss(&self, name: &str) {
        let mut session = lock_or_recover(&self.inner.session);
        session.dismiss(name);
        self.inner.tag_tx.send_replace(session.suggestions.clone());
    }

    /// Accepts a confident template banner, committing its destination.
    ///
    /// Returns `None` when there is no banner or it is below the
    /// confidence gate.
    pub fn accept_template_suggestion(&self) -> Option<Destination> {
        let mut session = lock_or_recover(&self.inner.session);
        if !session.template.is_confident() {
            return None;
        }

        let destination = session.template.destination;
        session.destination = Some(destination);
        session.template = TemplateSuggestion::empty();
        self.inner
            .template_tx
            .send_replace(TemplateSuggestion::empty());
        Some(destination)
    }

    /// Snapshot of the current ranked tag suggestion list.
    pub fn current_tag_suggestions(&self) -> Vec<Tag> {
        self.inner.tag_tx.borrow().clone()
    }

    /// Snapshot of the current template suggestion banner.
    pub fn current_template_suggestion(&self) -> TemplateSuggestion {
        *self.inner.template_tx.borrow()
    }

    /// Observable handle for the tag suggestion list.
    pub fn subscribe_tag_suggestions(&self) -> watch::Receiver<Vec<Tag>> {
        self.inner.tag_tx.subscribe()
    }

    /// Observable handle for the template suggestion banner.
    pub fn subscribe_template_suggestion(&self) -> watch::Receiver<TemplateSuggestion> {
        self.inner.template_tx.subscribe()
    }

    /// Tags currently attached to the memo draft, in adoption order.
    pub fn adopted_tags(&self) -> Vec<Tag> {
        lock_or_recover(&self.inner.session).adopted.clone()
    }

    /// Destination committed by accept or auto-switch, if any.
    pub fn current_destination(&self) -> Option<Destination> {
        lock_or_recover(&self.inner.session).destination
    }

    /// Evaluation lifecycle counters.
    pub fn stats(&self) -> EngineStats {
        EngineStats {
            evaluations_started: self.inner.started.load(Ordering::Relaxed),
            evaluations_committed: self.inner.committed.load(Ordering::Relaxed),
            evaluations_discarded: self.inner.discarded.load(Ordering::Relaxed),
        }
    }

    fn spawn_tag_evaluation(inner: Arc<EngineInner>, text: String, generation: u64) {
        inner.started.fetch_add(1, Ordering::Relaxed);
        tokio::spawn(async move {
            tokio::time::sleep(inner.config.tag_settle).await;
            if inner.is_stale(generation) {
                inner.discard("tag", generation);
                return;
            }

            // Snapshot inputs without holding any lock across scoring.
            let ranked = lock_or_recover(&inner.lexicon).rank();
            let (adopted_names, dismissed_names) = {
                let session = lock_or_recover(&inner.session);
                (session.adopted_names(), session.dismissed.clone())
            };

            if inner.is_stale(generation) {
                inner.discard("tag", generation);
                return;
            }

            let request = TagScoreRequest {
                text: &text,
                ranked_user_tags: &ranked,
                adopted_names: &adopted_names,
                dismissed_names: &dismissed_names,
                policy: inner.config.tag_policy,
            };
            let scored = score_tags(&request);

            let mut session = lock_or_recover(&inner.session);
            if inner.is_stale(generation) {
                inner.discard("tag", generation);
                return;
            }

            let candidate_count = scored.len();
            if inner.config.tag_policy == TagPolicy::AutoAdopt {
                for candidate in &scored {
                    if let Err(err) = inner.adopt_locked(&mut session, &candidate.tag.name) {
                        warn!(
                            "event=auto_adopt module=engine status=error tag={} error={err}",
                            candidate.tag.name
                        );
                    }
                }
            } else {
                session.suggestions = scored.into_iter().map(|scored| scored.tag).collect();
                inner.tag_tx.send_replace(session.suggestions.clone());
            }

            inner.committed.fetch_add(1, Ordering::Relaxed);
            debug!(
                "event=evaluation module=engine status=commit kind=tag generation={generation} candidates={candidate_count}"
            );
        });
    }

    fn spawn_template_evaluation(inner: Arc<EngineInner>, text: String, generation: u64) {
        inner.started.fetch_add(1, Ordering::Relaxed);
        tokio::spawn(async move {
            tokio::time::sleep(inner.config.template_settle).await;
            if inner.is_stale(generation) {
                inner.discard("template", generation);
                return;
            }

            let suggestion = score_template(&text, &inner.config.locale, inner.analyzer.as_ref());

            let mut session = lock_or_recover(&inner.session);
            if inner.is_stale(generation) {
                inner.discard("template", generation);
                return;
            }

            if inner.config.template_policy == TemplatePolicy::AutoSwitch
                && suggestion.is_confident()
            {
                // Confident result switches the destination directly; no
                // banner is surfaced.
                session.destination = Some(suggestion.destination);
                session.template = TemplateSuggestion::empty();
                inner
                    .template_tx
                    .send_replace(TemplateSuggestion::empty());
            } else {
                session.template = suggestion;
                inner.template_tx.send_replace(suggestion);
            }

            inner.committed.fetch_add(1, Ordering::Relaxed);
            debug!(
                "event=evaluation module=engine status=commit kind=template generation={generation} record_kind={:?} confidence={:.3}",
                suggestion.kind, suggestion.confidence
            );
        });
    }
}
