//! Scoring engines for tag candidates and task/note classification.
//!
//! # Responsibility
//! - Turn one text snapshot into a ranked tag candidate list and a
//!   confidence-bearing template classification.
//! - Stay pure: scoring never mutates lexicon or session state.
//!
//! # Invariants
//! - Given the same text, keyword tables and lexicon snapshot, both engines
//!   are deterministic and reproducible to floating-point tolerance.

pub mod tag;
pub mod template;
