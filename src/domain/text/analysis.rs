//! Whole-buffer decision for "fix all".
//!
//! Per-word assessments are tallied and the buffer lands in one of four buckets:
//! untouched, completely wrong, worth a partial fix, or protected.

use layout_fixer_core::text::mapping::{Script, script_of_char};
use serde::{Deserialize, Serialize};

use super::{
    classify::{Assessment, assess_word, looks_valid_as_typed},
    correction::Correction,
    protected::{ProtectedKind, protected_kind},
    segment::{Word, words},
};

pub const MIN_CONFIDENCE: f64 = 0.1;
pub const MAX_CONFIDENCE: f64 = 0.95;

/// Decision thresholds. Ratios are fractions of the analysed word count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Wrong-word ratio at or above which the buffer may be completely wrong.
    pub wrong_ratio: f64,
    /// Mixed-script ratio must stay strictly below this for a complete fix.
    pub max_mixed_ratio: f64,
    pub min_words: usize,
    /// Valid-word ratio must stay strictly below this for a complete fix.
    pub max_valid_ratio: f64,
    /// Valid-word ratio strictly above this rejects the buffer outright.
    pub mostly_valid_ratio: f64,
    pub selective_wrong_ratio: f64,
    pub selective_limit: usize,
    pub selective_scale: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            wrong_ratio: 0.7,
            max_mixed_ratio: 0.2,
            min_words: 3,
            max_valid_ratio: 0.3,
            mostly_valid_ratio: 0.7,
            selective_wrong_ratio: 0.3,
            selective_limit: 5,
            selective_scale: 0.7,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AnalysisReason {
    Empty,
    NoWords,
    AlreadyProcessed,
    RecentlyCorrected,
    Protected(ProtectedKind),
    AlreadyValid,
    MostlyValid,
    CompletelyWrong,
    Selective,
    LowConfidence,
}

impl AnalysisReason {
    pub fn as_str(self) -> &'static str {
        match self {
            AnalysisReason::Empty => "empty",
            AnalysisReason::NoWords => "no_words",
            AnalysisReason::AlreadyProcessed => "already_processed",
            AnalysisReason::RecentlyCorrected => "recently_corrected",
            AnalysisReason::Protected(kind) => kind.as_str(),
            AnalysisReason::AlreadyValid => "already_valid",
            AnalysisReason::MostlyValid => "mostly_valid",
            AnalysisReason::CompletelyWrong => "completely_wrong",
            AnalysisReason::Selective => "selective",
            AnalysisReason::LowConfidence => "low_confidence",
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct AnalysisStats {
    pub total: usize,
    pub arabic_only: usize,
    pub latin_only: usize,
    pub mixed: usize,
    pub valid: usize,
    pub wrong: usize,
    pub unknown: usize,
}

impl AnalysisStats {
    fn ratio(&self, count: usize) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        count as f64 / self.total as f64
    }

    pub fn wrong_ratio(&self) -> f64 {
        self.ratio(self.wrong)
    }

    pub fn valid_ratio(&self) -> f64 {
        self.ratio(self.valid)
    }

    pub fn mixed_ratio(&self) -> f64 {
        self.ratio(self.mixed)
    }

    fn count_script(&mut self, script: Script) {
        match script {
            Script::Arabic => self.arabic_only += 1,
            Script::Latin => self.latin_only += 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Analysis {
    pub should_process: bool,
    pub reason: AnalysisReason,
    pub corrections: Vec<Correction>,
    pub confidence: f64,
    pub stats: AnalysisStats,
}

impl Analysis {
    fn rejected(reason: AnalysisReason) -> Self {
        Self::rejected_with(reason, AnalysisStats::default())
    }

    fn rejected_with(reason: AnalysisReason, stats: AnalysisStats) -> Self {
        Self {
            should_process: false,
            reason,
            corrections: Vec::new(),
            confidence: MIN_CONFIDENCE,
            stats,
        }
    }
}

/// What has already been corrected for the buffer being analysed.
pub trait ProcessedHistory {
    /// Exact content was recorded after an earlier correction and has not expired.
    fn already_processed(&self, text: &str) -> bool;
    /// Content is close to something this engine produced moments ago.
    fn recently_produced(&self, text: &str) -> bool;
}

/// History that remembers nothing.
pub struct NoHistory;

impl ProcessedHistory for NoHistory {
    fn already_processed(&self, _text: &str) -> bool {
        false
    }

    fn recently_produced(&self, _text: &str) -> bool {
        false
    }
}

/// Heuristic confidence in a whole-buffer decision, clamped to
/// [`MIN_CONFIDENCE`, `MAX_CONFIDENCE`].
pub fn confidence_score(stats: &AnalysisStats) -> f64 {
    let wrong = stats.wrong_ratio();
    let valid = stats.valid_ratio();
    let mixed = stats.mixed_ratio();

    let mut score = wrong * (1.0 - valid);
    if valid > 0.5 {
        score *= 0.5;
    }
    if valid > 0.6 {
        score -= 0.3;
    }
    if wrong > 0.8 {
        score += 0.1;
    }
    if stats.mixed == 0 {
        score += 0.05;
    }
    if stats.total >= 5 {
        score += 0.05;
    }
    if mixed > 0.3 {
        score -= 0.2;
    }
    if stats.total < 3 {
        score -= 0.1;
    }
    score.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE)
}

fn is_basic_punctuation(ch: char) -> bool {
    matches!(
        ch,
        '.' | ',' | '!' | '?' | ';' | ':' | '\'' | '"' | '-' | '(' | ')' | '،' | '؛' | '؟'
    )
}

#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    thresholds: Thresholds,
}

impl Analyzer {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn analyze(&self, text: &str) -> Analysis {
        self.analyze_with_history(text, &NoHistory)
    }

    #[tracing::instrument(level = "trace", skip(self, text, history), fields(len = text.len()))]
    pub fn analyze_with_history(&self, text: &str, history: &dyn ProcessedHistory) -> Analysis {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Analysis::rejected(AnalysisReason::Empty);
        }
        if history.already_processed(text) {
            tracing::trace!("analysis skip: already processed");
            return Analysis::rejected(AnalysisReason::AlreadyProcessed);
        }
        if history.recently_produced(text) {
            tracing::trace!("analysis skip: matches a fresh correction");
            return Analysis::rejected(AnalysisReason::RecentlyCorrected);
        }
        if let Some(kind) = protected_kind(text) {
            tracing::trace!(kind = kind.as_str(), "analysis skip: protected content");
            return Analysis::rejected(AnalysisReason::Protected(kind));
        }
        if is_single_script_valid(trimmed) {
            tracing::trace!("analysis skip: single-script text already valid");
            return Analysis::rejected(AnalysisReason::AlreadyValid);
        }

        let (stats, candidates) = tally(&words(text));
        tracing::trace!(?stats, "analysis tally");
        self.decide(stats, candidates)
    }

    fn decide(&self, stats: AnalysisStats, mut candidates: Vec<Correction>) -> Analysis {
        let t = &self.thresholds;
        if stats.total == 0 {
            return Analysis::rejected_with(AnalysisReason::NoWords, stats);
        }

        let wrong = stats.wrong_ratio();
        let valid = stats.valid_ratio();
        let mixed = stats.mixed_ratio();

        if valid > t.mostly_valid_ratio {
            return Analysis::rejected_with(AnalysisReason::MostlyValid, stats);
        }

        let completely_wrong = wrong >= t.wrong_ratio
            && mixed < t.max_mixed_ratio
            && stats.total >= t.min_words
            && valid < t.max_valid_ratio;
        if completely_wrong {
            return Analysis {
                should_process: true,
                reason: AnalysisReason::CompletelyWrong,
                corrections: candidates,
                confidence: confidence_score(&stats),
                stats,
            };
        }

        if wrong > t.selective_wrong_ratio && stats.wrong > 0 {
            candidates.truncate(t.selective_limit);
            let confidence =
                (confidence_score(&stats) * t.selective_scale).clamp(MIN_CONFIDENCE, MAX_CONFIDENCE);
            return Analysis {
                should_process: true,
                reason: AnalysisReason::Selective,
                corrections: candidates,
                confidence,
                stats,
            };
        }

        Analysis::rejected_with(AnalysisReason::LowConfidence, stats)
    }
}

fn tally(words: &[Word]) -> (AnalysisStats, Vec<Correction>) {
    let mut stats = AnalysisStats::default();
    let mut candidates = Vec::new();

    for word in words {
        match assess_word(&word.text) {
            Assessment::Skipped => continue,
            Assessment::Mixed => stats.mixed += 1,
            Assessment::Valid(script) => {
                stats.valid += 1;
                stats.count_script(script);
            }
            Assessment::Unknown(script) => {
                stats.unknown += 1;
                stats.count_script(script);
            }
            Assessment::Wrong {
                script,
                converted,
                direction,
            } => {
                stats.wrong += 1;
                stats.count_script(script);
                candidates.push(Correction::for_word(word, converted, direction));
            }
        }
        stats.total += 1;
    }
    (stats, candidates)
}

/// Letters of one script plus basic punctuation, with every word valid as typed.
fn is_single_script_valid(trimmed: &str) -> bool {
    let mut script = None;
    for ch in trimmed.chars() {
        match script_of_char(ch) {
            Some(s) => {
                if *script.get_or_insert(s) != s {
                    return false;
                }
            }
            None if ch.is_whitespace() || is_basic_punctuation(ch) => {}
            None => return false,
        }
    }
    let Some(script) = script else {
        return false;
    };
    words(trimmed)
        .iter()
        .all(|w| looks_valid_as_typed(&w.text, script))
}
