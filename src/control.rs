//! Request/response pair for hosts that drive the engine over a message channel
//! (a popup, a background worker, a test harness).

use serde::{Deserialize, Serialize};

use crate::{
    correction::CorrectionEngine,
    domain::outcome::{ActionOutcome, SkipReason},
    surface::Page,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlRequest {
    FixCurrentWord,
    FixAll,
    Undo,
    QueryUndo,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub converted: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    pub can_undo: bool,
}

impl ControlResponse {
    fn skipped(reason: SkipReason, can_undo: bool) -> Self {
        Self {
            reason: Some(reason.as_str().to_owned()),
            can_undo,
            ..Self::default()
        }
    }
}

pub fn handle_request(
    engine: &mut CorrectionEngine,
    page: &mut Page,
    request: ControlRequest,
) -> ControlResponse {
    tracing::trace!(?request, "control request");
    let response = match request {
        ControlRequest::FixCurrentWord => match engine.fix_current_word(page) {
            ActionOutcome::Applied(fix) => ControlResponse {
                success: true,
                original: Some(fix.original),
                converted: Some(fix.converted),
                count: Some(1),
                ..ControlResponse::default()
            },
            ActionOutcome::Skipped(reason) => ControlResponse::skipped(reason, false),
        },
        ControlRequest::FixAll => match engine.fix_all(page) {
            ActionOutcome::Applied(fix) => ControlResponse {
                success: true,
                converted: Some(fix.text),
                count: Some(fix.count),
                ..ControlResponse::default()
            },
            ActionOutcome::Skipped(reason) => ControlResponse::skipped(reason, false),
        },
        ControlRequest::Undo => match engine.undo(page) {
            ActionOutcome::Applied(restored) => ControlResponse {
                success: true,
                original: Some(restored.text),
                count: Some(restored.corrections),
                ..ControlResponse::default()
            },
            ActionOutcome::Skipped(reason) => ControlResponse::skipped(reason, false),
        },
        ControlRequest::QueryUndo if engine.is_paused() => {
            ControlResponse::skipped(SkipReason::Paused, false)
        }
        ControlRequest::QueryUndo => ControlResponse {
            success: true,
            ..ControlResponse::default()
        },
    };
    ControlResponse {
        can_undo: engine.can_undo(),
        ..response
    }
}
