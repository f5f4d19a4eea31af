//! Core classification logic for TagNote.
//! This crate is the single source of truth for suggestion behavior.

pub mod db;
pub mod engine;
pub mod lexicon;
pub mod logging;
pub mod model;
pub mod score;
pub mod signal;

pub use engine::{EngineConfig, EngineStats, SuggestionEngine};
pub use lexicon::repo::{
    LexiconError, LexiconPersistence, LexiconResult, SqliteLexiconRepository,
};
pub use lexicon::store::LexiconStore;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::policy::{TagPolicy, TemplatePolicy};
pub use model::tag::{Tag, TagId, TagState, TagValidationError};
pub use model::template::{Destination, RecordKind, TemplateSuggestion};
pub use score::tag::{score_tags, ScoredTag, TagScoreRequest};
pub use score::template::score_template;
pub use signal::{LinguisticAnalyzer, NoopLinguisticAnalyzer, SignalCounts};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
