//! Linguistic signal adapter.
//!
//! # Responsibility
//! - Define the part-of-speech counting capability consumed by template
//!   scoring.
//! - Provide the zero-signal fallback used when no analyzer is available.
//!
//! # Invariants
//! - `analyze` is a pure function of `(text, locale)`.
//! - Analyzer absence degrades to zero counts; it never fails the scoring
//!   path.

/// Part-of-speech token counts over a fixed tokenization of one text span.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SignalCounts {
    /// Number of verb tokens.
    pub verb_count: u32,
    /// Number of noun tokens.
    pub noun_count: u32,
    /// Number of adjective tokens.
    pub adjective_count: u32,
}

impl SignalCounts {
    /// All-zero counts, the soft-dependency absence value.
    pub fn zero() -> Self {
        Self::default()
    }
}

/// External part-of-speech tagging capability.
///
/// The analyzer is a pluggable collaborator, not reimplemented here. Hosts
/// without the capability (unsupported locale, disabled permission) plug in
/// [`NoopLinguisticAnalyzer`].
pub trait LinguisticAnalyzer: Send + Sync {
    /// Counts verb/noun/adjective tokens in `text` for `locale`.
    ///
    /// Must be pure for a given `(text, locale)` pair and must not fail;
    /// unsupported input returns zero counts.
    fn analyze(&self, text: &str, locale: &str) -> SignalCounts;
}

/// Zero-signal analyzer for hosts without a part-of-speech tagger.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLinguisticAnalyzer;

impl LinguisticAnalyzer for NoopLinguisticAnalyzer {
    fn analyze(&self, _text: &str, _locale: &str) -> SignalCounts {
        SignalCounts::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::{LinguisticAnalyzer, NoopLinguisticAnalyzer, SignalCounts};

    #[test]
    fn noop_analyzer_returns_zero_counts() {
        let analyzer = NoopLinguisticAnalyzer;
        assert_eq!(
            analyzer.analyze("今日までに資料を提出する", "ja"),
            SignalCounts::zero()
        );
    }
}
