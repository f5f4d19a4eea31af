//! Tag candidate scoring.
//!
//! # Responsibility
//! - Score free text against the static keyword tables, preset names and
//!   pattern detectors.
//! - Produce a ranked, capped candidate list honoring session exclusions.
//!
//! # Invariants
//! - Empty/whitespace input or `TagPolicy::Off` short-circuits before any
//!   table scan.
//! - The result never exceeds [`MAX_CANDIDATES`] entries and never contains
//!   an adopted or dismissed name.
//! - Detector/keyword weights are a behavioral compatibility contract.

use crate::lexicon::keywords::{
    GENERIC_FALLBACK_TAG, KEYWORD_HIT_WEIGHT, KEYWORD_TAG_TABLE, PATTERN_DETECTORS,
    PRESET_TAG_NAMES,
};
use crate::lexicon::store::preset_tag_id;
use crate::model::policy::TagPolicy;
use crate::model::tag::{Tag, TagState};
use std::collections::{BTreeMap, BTreeSet};

/// Hard cap on the suggestion list length.
pub const MAX_CANDIDATES: usize = 5;

/// Minimum trimmed length (chars) for the top-user-tag fallback.
const FALLBACK_MIN_CHARS: usize = 5;
/// Weak score granted to the top-priority user tag fallback.
const FALLBACK_TOP_TAG_WEIGHT: u32 = 2;

/// Minimum trimmed length (chars) for the generic fallback candidate.
const GENERIC_FALLBACK_MIN_CHARS: usize = 10;
/// Weak score granted to the generic fallback candidate.
const GENERIC_FALLBACK_WEIGHT: u32 = 1;

/// One evaluation's input snapshot.
///
/// `ranked_user_tags` must already be in priority order (see
/// `LexiconStore::rank`); the scorer does not re-sort it.
#[derive(Debug)]
pub struct TagScoreRequest<'a> {
    /// Raw text, trimmed by the scorer.
    pub text: &'a str,
    /// User lexicon snapshot in priority order.
    pub ranked_user_tags: &'a [Tag],
    /// Tag names already adopted on the current memo draft.
    pub adopted_names: &'a BTreeSet<String>,
    /// Tag names dismissed for the remainder of the session.
    pub dismissed_names: &'a BTreeSet<String>,
    /// Active tag policy.
    pub policy: TagPolicy,
}

/// One ranked candidate with its final ranking key exposed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredTag {
    /// Candidate tag, state preset per policy.
    pub tag: Tag,
    /// Detector/keyword score plus the matching lexicon entry's priority.
    pub score: u32,
}

/// Scores `request.text` and returns the ranked, capped candidate list.
///
/// Pure: no lexicon writes, no session mutation. Candidates reuse the
/// persisted record (same id) when the name exists in the user lexicon,
/// the stable preset identity for preset names, and a fresh identity for
/// detector-only names.
pub fn score_tags(request: &TagScoreRequest<'_>) -> Vec<ScoredTag> {
    if request.policy == TagPolicy::Off {
        return Vec::new();
    }

    let trimmed = request.text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let lowered = trimmed.to_lowercase();
    let char_len = trimmed.chars().count();
    let mut hits: BTreeMap<&str, u32> = BTreeMap::new();

    for (keyword, tag_name) in KEYWORD_TAG_TABLE {
        if lowered.contains(keyword) {
            *hits.entry(*tag_name).or_insert(0) += KEYWORD_HIT_WEIGHT;
        }
    }

    for name in PRESET_TAG_NAMES {
        if lowered.contains(&name.to_lowercase()) {
            *hits.entry(*name).or_insert(0) += KEYWORD_HIT_WEIGHT;
        }
    }

    for detector in PATTERN_DETECTORS {
        // One contribution per detector, however many keywords match.
        if detector
            .keywords
            .iter()
            .any(|keyword| lowered.contains(keyword))
        {
            *hits.entry(detector.tag_name).or_insert(0) += detector.weight;
        }
    }

    // Default-tag fallback for longer uncategorized text. Both weak
    // candidates can coexist; this mirrors observed behavior.
    if hits.is_empty() && char_len >= FALLBACK_MIN_CHARS {
        if let Some(top) = request.ranked_user_tags.first() {
            *hits.entry(top.name.as_str()).or_insert(0) += FALLBACK_TOP_TAG_WEIGHT;
        }
    }
    if char_len >= GENERIC_FALLBACK_MIN_CHARS && hits.len() < 2 {
        *hits.entry(GENERIC_FALLBACK_TAG).or_insert(0) += GENERIC_FALLBACK_WEIGHT;
    }

    hits.retain(|name, _| {
        !request.adopted_names.contains(*name) && !request.dismissed_names.contains(*name)
    });

    let state = if request.policy == TagPolicy::AutoAdopt {
        TagState::Adopted
    } else {
        TagState::Suggested
    };

    let mut candidates: Vec<ScoredTag> = hits
        .into_iter()
        .map(|(name, hit_score)| {
            let user_entry = request
                .ranked_user_tags
                .iter()
                .find(|tag| tag.name == name);
            let score = hit_score + user_entry.map_or(0, Tag::priority_score);
            let mut tag = match user_entry {
                Some(existing) => existing.clone(),
                None if PRESET_TAG_NAMES.contains(&name) => Tag::with_id(preset_tag_id(name), name),
                None => Tag::new(name),
            };
            tag.state = state;
            ScoredTag { tag, score }
        })
        .collect();

    candidates.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.tag.name.cmp(&b.tag.name))
    });
    candidates.truncate(MAX_CANDIDATES);
    candidates
}
