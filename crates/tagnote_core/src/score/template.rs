//! Task/note template scoring.
//!
//! # Responsibility
//! - Accumulate competing task/note scores from keyword tiers, action
//!   verbs, date expressions, sentence form, length and linguistic signals.
//! - Resolve to a single classification with a normalized confidence.
//!
//! # Invariants
//! - Trimmed input under [`MIN_CHARS`] resolves to the empty suggestion
//!   with no scoring performed.
//! - Weights and the 2.0 decision threshold are a reproducibility
//!   contract: identical input and tables must yield identical scores.

use crate::model::template::{RecordKind, TemplateSuggestion};
use crate::signal::{LinguisticAnalyzer, SignalCounts};
use once_cell::sync::Lazy;
use regex::Regex;

/// Minimum trimmed length (chars) for template scoring.
pub const MIN_CHARS: usize = 5;

/// Minimum winning score for a non-empty classification.
const DECISION_THRESHOLD: f64 = 2.0;
/// Winning-score divisor in the confidence formula.
const CONFIDENCE_SCALE: f64 = 5.0;

const HIGH_WEIGHT: f64 = 2.5;
const MEDIUM_WEIGHT: f64 = 1.5;
const ACTION_VERB_WEIGHT: f64 = 1.0;
const DATE_WEIGHT: f64 = 1.5;
const SIGNAL_COUNT_WEIGHT: f64 = 0.3;
const NOUN_ONLY_WEIGHT: f64 = 0.5;
const QUESTION_WEIGHT: f64 = 1.0;
const EXCLAMATION_WEIGHT: f64 = 0.5;
const LONG_TEXT_WEIGHT: f64 = 0.5;
const SHORT_TEXT_WEIGHT: f64 = 0.3;

const LONG_TEXT_CHARS: usize = 100;
const SHORT_TEXT_CHARS: usize = 30;

/// Strong actionability cues.
const TASK_KEYWORDS_HIGH: &[&str] = &[
    "までに",
    "締切",
    "締め切り",
    "期限",
    "提出",
    "必ず",
    "やらなきゃ",
    "しないと",
    "todo",
    "deadline",
];

/// Strong reflective cues.
const NOTE_KEYWORDS_HIGH: &[&str] = &["アイデア", "思った", "感じた", "気づき", "ひらめき", "idea"];

/// Weaker actionability cues.
const TASK_KEYWORDS_MEDIUM: &[&str] = &[
    "予約",
    "連絡",
    "確認",
    "準備",
    "申し込み",
    "支払い",
    "手続き",
    "買う",
    "call",
    "email",
];

/// Weaker reflective cues.
const NOTE_KEYWORDS_MEDIUM: &[&str] = &[
    "かも",
    "面白い",
    "おもしろい",
    "好き",
    "気になる",
    "いい",
    "interesting",
];

/// Verbs implying an action to carry out.
const ACTION_VERBS: &[&str] = &[
    "する",
    "やる",
    "行く",
    "送る",
    "作る",
    "書く",
    "読む",
    "調べる",
    "終わらせる",
    "片付ける",
];

/// Relative day/week/month words counted as date expressions.
const DATE_KEYWORDS: &[&str] = &[
    "今日",
    "明日",
    "明後日",
    "今週",
    "来週",
    "週末",
    "今月",
    "来月",
    "午前",
    "午後",
    "today",
    "tomorrow",
    "tonight",
];

/// Clock time and calendar date forms.
static DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\d{1,2}時(半|\d{1,2}分)?",
        r"\d{1,2}:\d{2}",
        r"\d{1,2}月\d{1,2}日",
        r"[月火水木金土日]曜",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("valid date regex"))
    .collect()
});

/// Question-form sentence suffixes.
const QUESTION_SUFFIXES: &[&str] = &["かな", "だろうか", "かもしれない", "のか"];

/// Scores `text` into a task/note classification with confidence.
///
/// Pure: consults the analyzer read-only and touches no session state.
/// The analyzer is a soft dependency; zero counts simply contribute
/// nothing.
pub fn score_template(
    text: &str,
    locale: &str,
    analyzer: &dyn LinguisticAnalyzer,
) -> TemplateSuggestion {
    let trimmed = text.trim();
    let char_len = trimmed.chars().count();
    if char_len < MIN_CHARS {
        return TemplateSuggestion::empty();
    }

    let lowered = trimmed.to_lowercase();
    let mut task_score = 0.0_f64;
    let mut note_score = 0.0_f64;

    task_score += HIGH_WEIGHT * count_hits(&lowered, TASK_KEYWORDS_HIGH);
    note_score += HIGH_WEIGHT * count_hits(&lowered, NOTE_KEYWORDS_HIGH);
    task_score += MEDIUM_WEIGHT * count_hits(&lowered, TASK_KEYWORDS_MEDIUM);
    note_score += MEDIUM_WEIGHT * count_hits(&lowered, NOTE_KEYWORDS_MEDIUM);
    task_score += ACTION_VERB_WEIGHT * count_hits(&lowered, ACTION_VERBS);
    task_score += DATE_WEIGHT * date_expression_hits(&lowered);

    let SignalCounts {
        verb_count,
        noun_count,
        adjective_count,
    } = analyzer.analyze(trimmed, locale);
    if verb_count >= 2 {
        task_score += SIGNAL_COUNT_WEIGHT * f64::from(verb_count);
    }
    if adjective_count >= 2 {
        note_score += SIGNAL_COUNT_WEIGHT * f64::from(adjective_count);
    }
    if noun_count > 0 && verb_count == 0 {
        note_score += NOUN_ONLY_WEIGHT;
    }

    if has_question_form(trimmed) {
        note_score += QUESTION_WEIGHT;
    }
    if trimmed.contains('!') || trimmed.contains('！') {
        note_score += EXCLAMATION_WEIGHT;
    }

    if char_len > LONG_TEXT_CHARS {
        note_score += LONG_TEXT_WEIGHT;
    }
    if char_len < SHORT_TEXT_CHARS {
        task_score += SHORT_TEXT_WEIGHT;
    }

    resolve(task_score, note_score)
}

fn resolve(task_score: f64, note_score: f64) -> TemplateSuggestion {
    let total = task_score + note_score;
    if total == 0.0 {
        return TemplateSuggestion::empty();
    }

    if task_score >= note_score && task_score >= DECISION_THRESHOLD {
        TemplateSuggestion::for_kind(RecordKind::Task, confidence(task_score, total))
    } else if note_score > task_score && note_score >= DECISION_THRESHOLD {
        TemplateSuggestion::for_kind(RecordKind::Note, confidence(note_score, total))
    } else {
        TemplateSuggestion::empty()
    }
}

fn confidence(winner: f64, total: f64) -> f64 {
    ((winner / total) * (winner / CONFIDENCE_SCALE)).min(1.0)
}

fn count_hits(lowered: &str, keywords: &[&str]) -> f64 {
    keywords
        .iter()
        .filter(|keyword| lowered.contains(*keyword))
        .count() as f64
}

fn date_expression_hits(lowered: &str) -> f64 {
    let keyword_hits = DATE_KEYWORDS
        .iter()
        .filter(|keyword| lowered.contains(*keyword))
        .count();
    let pattern_hits = DATE_PATTERNS
        .iter()
        .filter(|pattern| pattern.is_match(lowered))
        .count();
    (keyword_hits + pattern_hits) as f64
}

fn has_question_form(trimmed: &str) -> bool {
    trimmed.contains('?')
        || trimmed.contains('？')
        || QUESTION_SUFFIXES
            .iter()
            .any(|suffix| trimmed.ends_with(suffix))
}

#[cfg(test)]
mod tests {
    use super::{resolve, score_template, MIN_CHARS};
    use crate::model::template::RecordKind;
    use crate::signal::{LinguisticAnalyzer, NoopLinguisticAnalyzer, SignalCounts};

    struct FixedAnalyzer(SignalCounts);

    impl LinguisticAnalyzer for FixedAnalyzer {
        fn analyze(&self, _text: &str, _locale: &str) -> SignalCounts {
            self.0
        }
    }

    #[test]
    fn short_text_is_empty_regardless_of_keywords() {
        // "提出" is a strong task cue but the text is under the length gate.
        let result = score_template("提出", "ja", &NoopLinguisticAnalyzer);
        assert!(result.is_empty());
        assert_eq!(result.confidence, 0.0);
        assert!("提出".chars().count() < MIN_CHARS);
    }

    #[test]
    fn zero_scores_resolve_to_empty() {
        assert!(resolve(0.0, 0.0).is_empty());
    }

    #[test]
    fn below_threshold_scores_resolve_to_empty() {
        assert!(resolve(1.5, 0.0).is_empty());
        assert!(resolve(0.0, 1.9).is_empty());
    }

    #[test]
    fn deadline_task_classifies_confidently() {
        // Date word + two strong task cues + action verb + short-text bump.
        let result = score_template("今日までに資料を提出する", "ja", &NoopLinguisticAnalyzer);
        assert_eq!(result.kind, RecordKind::Task);
        assert!(result.confidence >= 0.6, "confidence {}", result.confidence);
    }

    #[test]
    fn idea_reflection_classifies_as_note() {
        let result = score_template("これはいいアイデアかもしれない", "ja", &NoopLinguisticAnalyzer);
        assert_eq!(result.kind, RecordKind::Note);
    }

    #[test]
    fn tie_prefers_task() {
        let result = resolve(3.0, 3.0);
        assert_eq!(result.kind, RecordKind::Task);
    }

    #[test]
    fn confidence_is_clamped_to_one() {
        let result = resolve(50.0, 0.0);
        assert_eq!(result.confidence, 1.0);
    }

    #[test]
    fn confidence_formula_matches_reference_shape() {
        // task 4.0 vs note 1.0: (4/5) * (4/5) = 0.64.
        let result = resolve(4.0, 1.0);
        assert_eq!(result.kind, RecordKind::Task);
        assert!((result.confidence - 0.64).abs() < 1e-9);
    }

    #[test]
    fn verb_rich_signal_counts_toward_task() {
        let counts = SignalCounts {
            verb_count: 3,
            noun_count: 1,
            adjective_count: 0,
        };
        // Keyword-free text: only the linguistic and length terms apply.
        let with_verbs = score_template("あれをこれする流れ", "ja", &FixedAnalyzer(counts));
        let without = score_template("あれをこれする流れ", "ja", &NoopLinguisticAnalyzer);
        // 0.3 * 3 verbs on top of the shared baseline.
        assert!(with_verbs.confidence >= without.confidence);
    }

    #[test]
    fn noun_only_signal_counts_toward_note() {
        let counts = SignalCounts {
            verb_count: 0,
            noun_count: 2,
            adjective_count: 2,
        };
        // Reflective cue + adjectives + noun-only bonus lands on note.
        let result = score_template("今日の空の色が面白い", "ja", &FixedAnalyzer(counts));
        assert_eq!(result.kind, RecordKind::Note);
    }

    #[test]
    fn question_punctuation_counts_toward_note() {
        let with_question = score_template("あの店は面白いの？", "ja", &NoopLinguisticAnalyzer);
        assert_eq!(with_question.kind, RecordKind::Note);
    }
}
