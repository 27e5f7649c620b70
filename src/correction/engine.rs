use std::{
    collections::HashMap,
    slice,
    time::{Duration, Instant},
};

use layout_fixer_core::text::mapping::{convert_with_direction, direction_for_text};

use super::{
    fingerprint::{Fingerprint, FingerprintCache},
    history::{BatchKind, History, UndoRecord},
    splice::splice_corrections,
};
use crate::{
    clock::{Clock, SystemClock},
    config::Config,
    domain::{
        outcome::{ActionOutcome, SkipReason},
        text::{
            Analysis, AnalysisReason, Analyzer, Correction, Verdict, classify, segment::word_at,
        },
    },
    surface::{Page, SurfaceId, TextSurface},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordFix {
    pub surface: SurfaceId,
    pub original: String,
    pub converted: String,
    pub start: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BatchFix {
    pub surface: SurfaceId,
    pub count: usize,
    pub confidence: f64,
    pub reason: AnalysisReason,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Restored {
    pub surface: SurfaceId,
    pub text: String,
    pub corrections: usize,
}

/// Longest a planned batch may hold the engine busy without being committed.
pub const PENDING_BATCH_TIMEOUT: Duration = Duration::from_secs(10);

/// A detected batch waiting to be applied. Until it is committed, or
/// [`PENDING_BATCH_TIMEOUT`] passes, the engine refuses new work, so hosts can
/// animate between detection and [`CorrectionEngine::commit_batch`].
#[must_use = "a pending batch keeps the engine busy until it is committed"]
#[derive(Debug)]
pub struct PendingBatch {
    ticket: u64,
    surface: SurfaceId,
    snapshot: String,
    analysis: Analysis,
}

impl PendingBatch {
    pub fn surface(&self) -> SurfaceId {
        self.surface
    }

    pub fn corrections(&self) -> &[Correction] {
        &self.analysis.corrections
    }

    pub fn confidence(&self) -> f64 {
        self.analysis.confidence
    }

    pub fn reason(&self) -> AnalysisReason {
        self.analysis.reason
    }
}

#[derive(Copy, Clone, Debug)]
struct InFlight {
    ticket: u64,
    since: Instant,
}

#[derive(Debug)]
struct Suggestion {
    surface: SurfaceId,
    correction: Correction,
}

fn skip_reason_for(reason: AnalysisReason) -> SkipReason {
    match reason {
        AnalysisReason::Empty => SkipReason::EmptyBuffer,
        AnalysisReason::NoWords => SkipReason::NoWords,
        AnalysisReason::AlreadyProcessed => SkipReason::AlreadyProcessed,
        AnalysisReason::RecentlyCorrected => SkipReason::RecentlyCorrected,
        AnalysisReason::Protected(_) => SkipReason::ProtectedContent,
        AnalysisReason::AlreadyValid => SkipReason::AlreadyValid,
        AnalysisReason::MostlyValid => SkipReason::MostlyValid,
        AnalysisReason::CompletelyWrong
        | AnalysisReason::Selective
        | AnalysisReason::LowConfidence => SkipReason::LowConfidence,
    }
}

fn skip_reason_for_verdict(verdict: Verdict) -> Option<SkipReason> {
    match verdict {
        Verdict::Accept => None,
        Verdict::Unchanged => Some(SkipReason::NoChangeAfterConvert),
        Verdict::Whitelisted => Some(SkipReason::Whitelisted),
        Verdict::NotALetter => Some(SkipReason::NotALetter),
    }
}

/// Session context for one page: undo history, fingerprints, cooldowns and the
/// in-progress flag all live here and nowhere else.
pub struct CorrectionEngine {
    analyzer: Analyzer,
    history: History,
    fingerprints: FingerprintCache,
    cooldowns: HashMap<SurfaceId, Instant>,
    cooldown: Duration,
    in_flight: Option<InFlight>,
    next_ticket: u64,
    paused: bool,
    suggestion: Option<Suggestion>,
    clock: Box<dyn Clock>,
}

impl CorrectionEngine {
    pub fn new(config: &Config) -> Self {
        Self::with_clock(config, Box::new(SystemClock))
    }

    pub fn with_clock(config: &Config, clock: Box<dyn Clock>) -> Self {
        Self {
            analyzer: Analyzer::new(config.thresholds),
            history: History::new(config.history_depth),
            fingerprints: FingerprintCache::new(config.fingerprint_policy()),
            cooldowns: HashMap::new(),
            cooldown: config.cooldown(),
            in_flight: None,
            next_ticket: 0,
            paused: config.paused,
            suggestion: None,
            clock,
        }
    }

    /// Picks up changed preferences without dropping history.
    pub fn apply_config(&mut self, config: &Config) {
        self.analyzer = Analyzer::new(config.thresholds);
        self.history.set_cap(config.history_depth);
        self.fingerprints.set_policy(config.fingerprint_policy());
        self.cooldown = config.cooldown();
        self.set_paused(config.paused);
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            tracing::debug!(paused, "pause state changed");
        }
        self.paused = paused;
        if paused {
            self.suggestion = None;
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_in_progress(&self) -> bool {
        self.busy_at(self.clock.now())
    }

    /// An uncommitted plan stops counting once it is older than the timeout.
    fn busy_at(&self, now: Instant) -> bool {
        self.in_flight
            .is_some_and(|f| now.saturating_duration_since(f.since) < PENDING_BATCH_TIMEOUT)
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn pending_suggestion(&self) -> Option<&Correction> {
        self.suggestion.as_ref().map(|s| &s.correction)
    }

    fn ensure_ready(&mut self) -> Result<(), SkipReason> {
        if self.paused {
            return Err(SkipReason::Paused);
        }
        if let Some(flight) = self.in_flight {
            if self.busy_at(self.clock.now()) {
                return Err(SkipReason::InProgress);
            }
            tracing::warn!(ticket = flight.ticket, "pending batch never committed, released");
            self.in_flight = None;
        }
        Ok(())
    }

    fn on_cooldown(&self, surface: SurfaceId, now: Instant) -> bool {
        self.cooldowns.get(&surface).is_some_and(|until| now < *until)
    }

    fn start_cooldown(&mut self, surface: SurfaceId, now: Instant) {
        self.cooldowns.retain(|_, until| now < *until);
        self.cooldowns.insert(surface, now + self.cooldown);
    }

    fn detect_word(
        &self,
        id: SurfaceId,
        surface: &dyn TextSurface,
        now: Instant,
    ) -> Result<Correction, SkipReason> {
        let text = surface.text();
        if text.is_empty() {
            return Err(SkipReason::EmptyBuffer);
        }
        let word = word_at(&text, surface.caret_offset()).ok_or(SkipReason::NoWordAtCaret)?;

        let direction = direction_for_text(&word.text);
        let converted = convert_with_direction(&word.text, direction);
        if let Some(reason) = skip_reason_for_verdict(classify(&word.text, &converted)) {
            tracing::trace!(word = %word.text, reason = %reason, "word skip");
            return Err(reason);
        }
        if self
            .fingerprints
            .contains(&Fingerprint::of_word(id, word.start, &word.text), now)
        {
            tracing::trace!(word = %word.text, start = word.start, "word skip: replaced moments ago");
            return Err(SkipReason::AlreadyReplaced);
        }
        Ok(Correction::for_word(&word, converted, direction))
    }

    /// Looks at the word under the caret of the focused surface and remembers it
    /// so a later [`accept_suggestion`](Self::accept_suggestion) needs no arguments.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn suggest(&mut self, page: &Page) -> ActionOutcome<Correction> {
        self.suggestion = None;
        if let Err(reason) = self.ensure_ready() {
            return reason.into();
        }
        let Some(id) = page.focused_id() else {
            return SkipReason::NoFocusedSurface.into();
        };
        let Some(surface) = page.get(id) else {
            return SkipReason::NoFocusedSurface.into();
        };
        let now = self.clock.now();
        match self.detect_word(id, surface, now) {
            Ok(correction) => {
                tracing::trace!(original = %correction.original, converted = %correction.converted, "suggestion");
                self.suggestion = Some(Suggestion {
                    surface: id,
                    correction: correction.clone(),
                });
                ActionOutcome::Applied(correction)
            }
            Err(reason) => reason.into(),
        }
    }

    pub fn dismiss_suggestion(&mut self) {
        self.suggestion = None;
    }

    #[tracing::instrument(level = "trace", skip_all)]
    pub fn accept_suggestion(&mut self, page: &mut Page) -> ActionOutcome<WordFix> {
        if let Err(reason) = self.ensure_ready() {
            return reason.into();
        }
        let Some(Suggestion {
            surface: id,
            correction,
        }) = self.suggestion.take()
        else {
            return SkipReason::NoSuggestion.into();
        };
        let Some(surface) = page.get_mut(id) else {
            tracing::warn!(surface = id.raw(), "suggested surface is gone");
            return SkipReason::SurfaceDetached.into();
        };
        self.apply_word(id, surface, correction)
    }

    #[tracing::instrument(level = "trace", skip_all)]
    pub fn fix_current_word(&mut self, page: &mut Page) -> ActionOutcome<WordFix> {
        if let Err(reason) = self.ensure_ready() {
            return reason.into();
        }
        let Some((id, surface)) = page.focused_mut() else {
            return SkipReason::NoFocusedSurface.into();
        };
        let now = self.clock.now();
        match self.detect_word(id, &*surface, now) {
            Ok(correction) => self.apply_word(id, surface, correction),
            Err(reason) => reason.into(),
        }
    }

    fn apply_word(
        &mut self,
        id: SurfaceId,
        surface: &mut dyn TextSurface,
        correction: Correction,
    ) -> ActionOutcome<WordFix> {
        let before = surface.text();
        let Some(after) = splice_corrections(&before, slice::from_ref(&correction)) else {
            return SkipReason::StaleCorrection.into();
        };
        surface.set_text(&after);
        surface.set_caret_offset(correction.start + correction.converted.chars().count());

        let now = self.clock.now();
        self.fingerprints.record(
            Fingerprint::of_word(id, correction.start, &correction.original),
            now,
        );
        self.fingerprints.record(
            Fingerprint::of_word(id, correction.start, &correction.converted),
            now,
        );
        self.suggestion = None;

        tracing::debug!(
            original = %correction.original,
            converted = %correction.converted,
            start = correction.start,
            "word corrected"
        );
        let fix = WordFix {
            surface: id,
            original: correction.original.clone(),
            converted: correction.converted.clone(),
            start: correction.start,
        };
        self.history.push(UndoRecord {
            surface: id,
            kind: BatchKind::SingleWord,
            original_text: before,
            corrected_text: after,
            corrections: vec![correction],
            applied_at: now,
        });
        ActionOutcome::Applied(fix)
    }

    /// Whole-buffer analysis for `text` on `surface`, honouring recent corrections.
    /// Reports without touching anything, but still refuses while paused.
    pub fn analyze(&self, surface: SurfaceId, text: &str) -> ActionOutcome<Analysis> {
        if self.paused {
            return SkipReason::Paused.into();
        }
        ActionOutcome::Applied(self.analysis_for(surface, text))
    }

    fn analysis_for(&self, surface: SurfaceId, text: &str) -> Analysis {
        let now = self.clock.now();
        self.analyzer
            .analyze_with_history(text, &self.fingerprints.view(surface, now))
    }

    /// Detects and applies in one step.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn fix_all(&mut self, page: &mut Page) -> ActionOutcome<BatchFix> {
        match self.plan_fix_all(page) {
            ActionOutcome::Applied(batch) => self.commit_batch(page, batch),
            ActionOutcome::Skipped(reason) => reason.into(),
        }
    }

    /// First half of "fix all": analyse the focused surface and hold the engine busy.
    pub fn plan_fix_all(&mut self, page: &Page) -> ActionOutcome<PendingBatch> {
        if let Err(reason) = self.ensure_ready() {
            tracing::trace!(reason = %reason, "fix all skip");
            return reason.into();
        }
        let Some(id) = page.focused_id() else {
            return SkipReason::NoFocusedSurface.into();
        };
        let Some(surface) = page.get(id) else {
            return SkipReason::NoFocusedSurface.into();
        };
        let now = self.clock.now();
        if self.on_cooldown(id, now) {
            tracing::trace!(surface = id.raw(), "fix all skip: cooldown");
            return SkipReason::OnCooldown.into();
        }
        let text = surface.text();
        if text.trim().is_empty() {
            return SkipReason::EmptyBuffer.into();
        }

        let analysis = self.analysis_for(id, &text);
        if !analysis.should_process {
            tracing::trace!(reason = analysis.reason.as_str(), "fix all skip: analysis");
            return skip_reason_for(analysis.reason).into();
        }
        tracing::trace!(
            reason = analysis.reason.as_str(),
            confidence = analysis.confidence,
            corrections = analysis.corrections.len(),
            "fix all planned"
        );
        self.next_ticket += 1;
        let ticket = self.next_ticket;
        self.in_flight = Some(InFlight { ticket, since: now });
        ActionOutcome::Applied(PendingBatch {
            ticket,
            surface: id,
            snapshot: text,
            analysis,
        })
    }

    /// Second half of "fix all". Releases the engine when `batch` is the plan it
    /// is waiting on; a plan that was superseded after timing out is rejected.
    pub fn commit_batch(&mut self, page: &mut Page, batch: PendingBatch) -> ActionOutcome<BatchFix> {
        let PendingBatch {
            ticket,
            surface: id,
            snapshot,
            analysis,
        } = batch;
        match self.in_flight {
            Some(flight) if flight.ticket == ticket => self.in_flight = None,
            Some(_) => {
                tracing::warn!(ticket, "superseded batch dropped");
                return SkipReason::StaleCorrection.into();
            }
            None => {}
        }

        let Some(surface) = page.get_mut(id) else {
            tracing::warn!(surface = id.raw(), "batch surface is gone");
            return SkipReason::SurfaceDetached.into();
        };
        if surface.text() != snapshot {
            tracing::warn!(surface = id.raw(), "text changed while batch was pending");
            return SkipReason::StaleCorrection.into();
        }
        let Some(after) = splice_corrections(&snapshot, &analysis.corrections) else {
            return SkipReason::StaleCorrection.into();
        };
        surface.set_text(&after);
        surface.set_editable(true);

        let now = self.clock.now();
        self.fingerprints.record_output(id, &after, now);
        self.start_cooldown(id, now);
        self.suggestion = None;

        tracing::debug!(
            surface = id.raw(),
            count = analysis.corrections.len(),
            confidence = analysis.confidence,
            "batch applied"
        );
        let fix = BatchFix {
            surface: id,
            count: analysis.corrections.len(),
            confidence: analysis.confidence,
            reason: analysis.reason,
            text: after.clone(),
        };
        self.history.push(UndoRecord {
            surface: id,
            kind: BatchKind::Batch,
            original_text: snapshot,
            corrected_text: after,
            corrections: analysis.corrections,
            applied_at: now,
        });
        ActionOutcome::Applied(fix)
    }

    /// Reverts the most recent batch, whichever surface it touched.
    ///
    /// A record whose surface is gone is discarded and reported as a skip.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn undo(&mut self, page: &mut Page) -> ActionOutcome<Restored> {
        if let Err(reason) = self.ensure_ready() {
            return reason.into();
        }
        let Some(record) = self.history.pop() else {
            return SkipReason::NothingToUndo.into();
        };
        let Some(surface) = page.get_mut(record.surface) else {
            tracing::warn!(surface = record.surface.raw(), "undo target is gone, record dropped");
            return SkipReason::SurfaceDetached.into();
        };
        surface.set_text(&record.original_text);
        surface.set_editable(true);
        self.suggestion = None;

        tracing::debug!(
            surface = record.surface.raw(),
            kind = ?record.kind,
            corrections = record.corrections.len(),
            "undo applied"
        );
        ActionOutcome::Applied(Restored {
            surface: record.surface,
            text: record.original_text,
            corrections: record.corrections.len(),
        })
    }
}
