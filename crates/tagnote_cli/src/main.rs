//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `tagnote_core` linkage.
//! - Classify one line of text with the pure scorers, deterministically.

use std::collections::BTreeSet;
use tagnote_core::{
    score_tags, score_template, NoopLinguisticAnalyzer, TagPolicy, TagScoreRequest,
};

fn main() {
    let text = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "今日までに資料を提出する".to_string());

    println!("tagnote_core version={}", tagnote_core::core_version());

    let adopted = BTreeSet::new();
    let dismissed = BTreeSet::new();
    let request = TagScoreRequest {
        text: &text,
        ranked_user_tags: &[],
        adopted_names: &adopted,
        dismissed_names: &dismissed,
        policy: TagPolicy::SuggestOnly,
    };
    for scored in score_tags(&request) {
        println!("tag name={} score={}", scored.tag.name, scored.score);
    }

    let suggestion = score_template(&text, "ja", &NoopLinguisticAnalyzer);
    println!(
        "template kind={:?} confidence={:.3} destination={:?}",
        suggestion.kind, suggestion.confidence, suggestion.destination
    );
}
