use std::fmt;

/// Result of a user-triggered action. Nothing here is an error: every entry point
/// reports a skip as data and the caller branches on it.
#[derive(Clone, Debug, PartialEq)]
pub enum ActionOutcome<T = ()> {
    Applied(T),
    Skipped(SkipReason),
}

impl<T> ActionOutcome<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, ActionOutcome::Applied(_))
    }

    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            ActionOutcome::Applied(_) => None,
            ActionOutcome::Skipped(reason) => Some(*reason),
        }
    }

    pub fn applied(self) -> Option<T> {
        match self {
            ActionOutcome::Applied(v) => Some(v),
            ActionOutcome::Skipped(_) => None,
        }
    }
}

impl<T> From<SkipReason> for ActionOutcome<T> {
    fn from(reason: SkipReason) -> Self {
        ActionOutcome::Skipped(reason)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    Paused,
    NoFocusedSurface,
    EmptyBuffer,
    NoWordAtCaret,
    NoChangeAfterConvert,
    Whitelisted,
    NotALetter,
    AlreadyReplaced,
    NoSuggestion,
    InProgress,
    OnCooldown,
    StaleCorrection,
    NothingToUndo,
    SurfaceDetached,
    NoWords,
    AlreadyProcessed,
    RecentlyCorrected,
    ProtectedContent,
    AlreadyValid,
    MostlyValid,
    LowConfidence,
}

impl SkipReason {
    pub fn as_str(self) -> &'static str {
        match self {
            SkipReason::Paused => "paused",
            SkipReason::NoFocusedSurface => "no_focused_surface",
            SkipReason::EmptyBuffer => "empty_buffer",
            SkipReason::NoWordAtCaret => "no_word_at_caret",
            SkipReason::NoChangeAfterConvert => "no_change_after_convert",
            SkipReason::Whitelisted => "whitelisted",
            SkipReason::NotALetter => "not_a_letter",
            SkipReason::AlreadyReplaced => "already_replaced",
            SkipReason::NoSuggestion => "no_suggestion",
            SkipReason::InProgress => "in_progress",
            SkipReason::OnCooldown => "on_cooldown",
            SkipReason::StaleCorrection => "stale_correction",
            SkipReason::NothingToUndo => "nothing_to_undo",
            SkipReason::SurfaceDetached => "surface_detached",
            SkipReason::NoWords => "no_words",
            SkipReason::AlreadyProcessed => "already_processed",
            SkipReason::RecentlyCorrected => "recently_corrected",
            SkipReason::ProtectedContent => "protected_content",
            SkipReason::AlreadyValid => "already_valid",
            SkipReason::MostlyValid => "mostly_valid",
            SkipReason::LowConfidence => "low_confidence",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
