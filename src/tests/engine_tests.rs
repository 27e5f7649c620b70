use std::time::Duration;

use tracing_test::traced_test;

use crate::{
    config::Config,
    control::{ControlRequest, handle_request},
    correction::{BatchKind, PENDING_BATCH_TIMEOUT},
    domain::{
        outcome::{ActionOutcome, SkipReason},
        text::AnalysisReason,
    },
    surface::{Page, StringSurface, SurfaceKind, TextSurface},
    tests::support::{engine, engine_with, focused_page, text_of},
};

const WRONG_SENTENCE: &str = "فاث صخقمي هس لخخي";

#[test]
fn caret_word_is_fixed_once() {
    let (mut engine, _clock) = engine();
    let (mut page, id) = focused_page("ضخص");

    let fix = engine.fix_current_word(&mut page).applied().expect("word fixed");
    assert_eq!(fix.original, "ضخص");
    assert_eq!(fix.converted, "qow");
    assert_eq!(text_of(&page, id), "qow");

    assert_eq!(
        engine.fix_current_word(&mut page).skip_reason(),
        Some(SkipReason::AlreadyReplaced)
    );
    assert_eq!(text_of(&page, id), "qow");
}

#[test]
fn word_fingerprint_expires_after_ttl() {
    let (mut engine, clock) = engine();
    let (mut page, id) = focused_page("ضخص");
    assert!(engine.fix_current_word(&mut page).is_applied());

    clock.advance(Duration::from_secs(31));
    assert!(engine.fix_current_word(&mut page).is_applied());
    assert_eq!(text_of(&page, id), "ضخص");
}

#[test]
fn caret_lands_after_replaced_word() {
    let (mut engine, _clock) = engine();
    let mut page = Page::new();
    let id = page.bind(Box::new(StringSurface::plain("اثممخ world").with_caret(2)));
    page.focus(id);

    assert!(engine.fix_current_word(&mut page).is_applied());
    assert_eq!(text_of(&page, id), "hello world");
    assert_eq!(page.get(id).map(|s| s.caret_offset()), Some(5));
}

#[test]
fn lam_alef_word_changes_length() {
    let (mut engine, _clock) = engine();
    let mut page = Page::new();
    let id = page.bind(Box::new(StringSurface::plain("ok hgsbl").with_caret(8)));
    page.focus(id);

    assert!(engine.fix_current_word(&mut page).is_applied());
    assert_eq!(text_of(&page, id), "ok السلام");
    assert_eq!(page.get(id).map(|s| s.caret_offset()), Some(9));
}

#[test]
fn caret_fix_skips() {
    let (mut engine, _clock) = engine();

    let (mut page, _) = focused_page("");
    assert_eq!(engine.fix_current_word(&mut page).skip_reason(), Some(SkipReason::EmptyBuffer));

    let (mut page, _) = focused_page("abc ");
    assert_eq!(engine.fix_current_word(&mut page).skip_reason(), Some(SkipReason::NoWordAtCaret));

    let (mut page, _) = focused_page("2024");
    assert_eq!(
        engine.fix_current_word(&mut page).skip_reason(),
        Some(SkipReason::NoChangeAfterConvert)
    );

    let mut page = Page::new();
    page.bind(Box::new(StringSurface::plain("ضخص")));
    assert_eq!(
        engine.fix_current_word(&mut page).skip_reason(),
        Some(SkipReason::NoFocusedSurface)
    );
}

#[test]
fn suggestion_is_accepted_without_arguments() {
    let (mut engine, _clock) = engine();
    let (mut page, id) = focused_page("اثممخ");

    let suggestion = engine.suggest(&page).applied().expect("suggestion");
    assert_eq!(suggestion.converted, "hello");
    assert!(engine.pending_suggestion().is_some());

    let fix = engine.accept_suggestion(&mut page).applied().expect("accepted");
    assert_eq!(fix.converted, "hello");
    assert_eq!(text_of(&page, id), "hello");
    assert_eq!(engine.accept_suggestion(&mut page).skip_reason(), Some(SkipReason::NoSuggestion));
}

#[test]
fn stale_suggestion_is_rejected() {
    let (mut engine, _clock) = engine();
    let (mut page, id) = focused_page("اثممخ");
    assert!(engine.suggest(&page).is_applied());

    if let Some(surface) = page.get_mut(id) {
        surface.set_text("something else");
    }
    assert_eq!(
        engine.accept_suggestion(&mut page).skip_reason(),
        Some(SkipReason::StaleCorrection)
    );
    assert_eq!(text_of(&page, id), "something else");
    assert!(!engine.can_undo());
}

#[test]
fn dismissed_suggestion_is_gone() {
    let (mut engine, _clock) = engine();
    let (mut page, _) = focused_page("اثممخ");
    assert!(engine.suggest(&page).is_applied());
    engine.dismiss_suggestion();
    assert!(engine.pending_suggestion().is_none());
    assert_eq!(engine.accept_suggestion(&mut page).skip_reason(), Some(SkipReason::NoSuggestion));
}

#[traced_test]
#[test]
fn fix_all_then_undo_restores_exact_text() {
    let (mut engine, _clock) = engine();
    let (mut page, id) = focused_page(WRONG_SENTENCE);

    let batch = engine.fix_all(&mut page).applied().expect("batch applied");
    assert_eq!(batch.count, 4);
    assert_eq!(batch.reason, AnalysisReason::CompletelyWrong);
    assert_eq!(text_of(&page, id), "the world is good");
    assert_eq!(engine.undo_depth(), 1);
    assert!(logs_contain("batch applied"));

    let restored = engine.undo(&mut page).applied().expect("undone");
    assert_eq!(restored.text, WRONG_SENTENCE);
    assert_eq!(restored.corrections, 4);
    assert_eq!(text_of(&page, id), WRONG_SENTENCE);
    assert_eq!(engine.undo_depth(), 0);
    assert!(!engine.can_undo());
    assert_eq!(engine.undo(&mut page).skip_reason(), Some(SkipReason::NothingToUndo));
}

#[test]
fn undo_is_lifo_across_kinds() {
    let (mut engine, _clock) = engine();
    let (mut page, first) = focused_page(WRONG_SENTENCE);
    assert!(engine.fix_all(&mut page).is_applied());

    let second = page.bind(Box::new(StringSurface::plain("ضخص")));
    page.focus(second);
    assert!(engine.fix_current_word(&mut page).is_applied());

    assert_eq!(engine.history().peek().map(|r| r.kind), Some(BatchKind::SingleWord));
    let restored = engine.undo(&mut page).applied().expect("word undone");
    assert_eq!(restored.surface, second);
    assert_eq!(text_of(&page, second), "ضخص");

    assert_eq!(engine.history().peek().map(|r| r.kind), Some(BatchKind::Batch));
    assert!(engine.undo(&mut page).is_applied());
    assert_eq!(text_of(&page, first), WRONG_SENTENCE);
}

#[test]
fn fix_all_is_throttled_per_surface() {
    let (mut engine, clock) = engine();
    let (mut page, id) = focused_page(WRONG_SENTENCE);
    assert!(engine.fix_all(&mut page).is_applied());

    assert_eq!(engine.fix_all(&mut page).skip_reason(), Some(SkipReason::OnCooldown));

    let other = page.bind(Box::new(StringSurface::plain("اثممخ صخقمي هس")));
    page.focus(other);
    assert!(engine.fix_all(&mut page).is_applied());

    page.focus(id);
    clock.advance(Duration::from_secs(3));
    assert_eq!(engine.fix_all(&mut page).skip_reason(), Some(SkipReason::AlreadyProcessed));
}

#[test]
fn near_copy_of_fresh_output_is_not_reprocessed() {
    let (mut engine, clock) = engine();
    let (mut page, id) = focused_page(WRONG_SENTENCE);
    assert!(engine.fix_all(&mut page).is_applied());

    clock.advance(Duration::from_secs(3));
    if let Some(surface) = page.get_mut(id) {
        surface.set_text("the world is good!");
    }
    assert_eq!(
        engine.fix_all(&mut page).skip_reason(),
        Some(SkipReason::RecentlyCorrected)
    );

    clock.advance(Duration::from_secs(3));
    assert_eq!(engine.fix_all(&mut page).skip_reason(), Some(SkipReason::AlreadyValid));
}

#[test]
fn plan_holds_engine_busy_until_commit() {
    let (mut engine, _clock) = engine();
    let (mut page, id) = focused_page(WRONG_SENTENCE);

    let plan = engine.plan_fix_all(&page).applied().expect("planned");
    assert_eq!(plan.surface(), id);
    assert_eq!(plan.corrections().len(), 4);
    assert!(engine.is_in_progress());

    assert_eq!(engine.fix_current_word(&mut page).skip_reason(), Some(SkipReason::InProgress));
    assert_eq!(engine.fix_all(&mut page).skip_reason(), Some(SkipReason::InProgress));
    assert_eq!(engine.undo(&mut page).skip_reason(), Some(SkipReason::InProgress));

    assert!(engine.commit_batch(&mut page, plan).is_applied());
    assert!(!engine.is_in_progress());
    assert_eq!(text_of(&page, id), "the world is good");
}

#[test]
fn stale_plan_releases_engine() {
    let (mut engine, _clock) = engine();
    let (mut page, id) = focused_page(WRONG_SENTENCE);

    let plan = engine.plan_fix_all(&page).applied().expect("planned");
    if let Some(surface) = page.get_mut(id) {
        surface.set_text("typed meanwhile");
    }
    assert_eq!(
        engine.commit_batch(&mut page, plan).skip_reason(),
        Some(SkipReason::StaleCorrection)
    );
    assert!(!engine.is_in_progress());
    assert!(!engine.can_undo());
    assert_eq!(text_of(&page, id), "typed meanwhile");
}

#[traced_test]
#[test]
fn abandoned_plan_is_released_after_timeout() {
    let (mut engine, clock) = engine();
    let (mut page, id) = focused_page(WRONG_SENTENCE);

    let plan = engine.plan_fix_all(&page).applied().expect("planned");
    drop(plan);
    clock.advance(PENDING_BATCH_TIMEOUT - Duration::from_secs(1));
    assert!(engine.is_in_progress());
    assert_eq!(engine.fix_current_word(&mut page).skip_reason(), Some(SkipReason::InProgress));

    clock.advance(Duration::from_secs(2));
    assert!(!engine.is_in_progress());
    assert!(engine.fix_all(&mut page).is_applied());
    assert_eq!(text_of(&page, id), "the world is good");
    assert!(logs_contain("pending batch never committed"));
}

#[test]
fn superseded_plan_cannot_commit() {
    let (mut engine, clock) = engine();
    let (mut page, id) = focused_page(WRONG_SENTENCE);

    let first = engine.plan_fix_all(&page).applied().expect("first plan");
    clock.advance(PENDING_BATCH_TIMEOUT + Duration::from_secs(1));
    let second = engine.plan_fix_all(&page).applied().expect("second plan");

    assert_eq!(
        engine.commit_batch(&mut page, first).skip_reason(),
        Some(SkipReason::StaleCorrection)
    );
    assert!(engine.is_in_progress());
    assert_eq!(text_of(&page, id), WRONG_SENTENCE);

    assert!(engine.commit_batch(&mut page, second).is_applied());
    assert!(!engine.is_in_progress());
    assert_eq!(text_of(&page, id), "the world is good");
}

#[test]
fn plan_for_detached_surface_is_dropped() {
    let (mut engine, _clock) = engine();
    let (mut page, id) = focused_page(WRONG_SENTENCE);
    let plan = engine.plan_fix_all(&page).applied().expect("planned");
    assert!(page.detach(id).is_some());
    assert_eq!(
        engine.commit_batch(&mut page, plan).skip_reason(),
        Some(SkipReason::SurfaceDetached)
    );
    assert!(!engine.is_in_progress());
}

#[traced_test]
#[test]
fn undo_for_detached_surface_discards_record() {
    let (mut engine, _clock) = engine();
    let (mut page, id) = focused_page(WRONG_SENTENCE);
    assert!(engine.fix_all(&mut page).is_applied());
    assert!(page.detach(id).is_some());

    assert_eq!(engine.undo(&mut page).skip_reason(), Some(SkipReason::SurfaceDetached));
    assert_eq!(engine.undo_depth(), 0);
    assert!(logs_contain("undo target is gone"));
}

#[test]
fn paused_engine_does_nothing() {
    let config = Config {
        paused: true,
        ..Config::default()
    };
    let (mut engine, _clock) = engine_with(&config);
    let (mut page, id) = focused_page(WRONG_SENTENCE);

    assert_eq!(engine.fix_all(&mut page).skip_reason(), Some(SkipReason::Paused));
    assert_eq!(engine.fix_current_word(&mut page).skip_reason(), Some(SkipReason::Paused));
    assert_eq!(engine.suggest(&page).skip_reason(), Some(SkipReason::Paused));
    assert_eq!(engine.analyze(id, WRONG_SENTENCE).skip_reason(), Some(SkipReason::Paused));
    let query = handle_request(&mut engine, &mut page, ControlRequest::QueryUndo);
    assert!(!query.success);
    assert_eq!(query.reason.as_deref(), Some("paused"));
    assert_eq!(text_of(&page, id), WRONG_SENTENCE);
    assert!(engine.is_paused());

    engine.set_paused(false);
    assert!(engine.fix_all(&mut page).is_applied());
}

#[test]
fn history_depth_is_bounded() {
    let config = Config {
        history_depth: 2,
        ..Config::default()
    };
    let (mut engine, _clock) = engine_with(&config);
    let mut page = Page::new();
    for text in ["ضخص", "اثممخ", "لخخي"] {
        let id = page.bind(Box::new(StringSurface::plain(text)));
        page.focus(id);
        assert!(engine.fix_current_word(&mut page).is_applied());
    }
    assert_eq!(engine.undo_depth(), 2);

    engine.apply_config(&Config {
        history_depth: 1,
        ..Config::default()
    });
    assert_eq!(engine.undo_depth(), 1);
    assert_eq!(engine.history().cap(), 1);
    assert_eq!(engine.history().peek().map(|r| r.corrected_text.as_str()), Some("good"));
}

#[test]
fn mostly_valid_buffer_is_reported_not_changed() {
    let (mut engine, _clock) = engine();
    let (mut page, id) = focused_page("hello world this is good مرحبا");
    assert_eq!(engine.fix_all(&mut page).skip_reason(), Some(SkipReason::MostlyValid));
    assert_eq!(text_of(&page, id), "hello world this is good مرحبا");
}

#[test]
fn rich_text_surface_is_edited_as_a_whole() {
    let (mut engine, _clock) = engine();
    let mut page = Page::new();
    let id = page.bind(Box::new(StringSurface::new(SurfaceKind::RichText, WRONG_SENTENCE)));
    page.focus(id);

    let outcome = engine.fix_all(&mut page);
    assert!(matches!(outcome, ActionOutcome::Applied(ref b) if b.surface == id));
    assert_eq!(page.get(id).map(|s| s.kind()), Some(SurfaceKind::RichText));
    assert_eq!(text_of(&page, id), "the world is good");
}

#[test]
fn analyze_reports_without_mutating() {
    let (engine, _clock) = engine();
    let (page, id) = focused_page(WRONG_SENTENCE);
    let analysis = engine.analyze(id, WRONG_SENTENCE).applied().expect("analysis");
    assert!(analysis.should_process);
    assert_eq!(text_of(&page, id), WRONG_SENTENCE);
}

#[test]
fn blurred_page_has_no_target() {
    let (mut engine, _clock) = engine();
    let (mut page, id) = focused_page(WRONG_SENTENCE);
    page.blur();
    assert_eq!(engine.fix_all(&mut page).skip_reason(), Some(SkipReason::NoFocusedSurface));
    assert!(page.focus(id));
    assert!(page.detach(id).is_some());
    assert!(!page.focus(id));
    assert_eq!(page.focused_id(), None);
}

#[test]
fn string_surface_clamps_caret_and_tracks_lock() {
    let mut surface = StringSurface::plain("ضخص").with_caret(10);
    assert_eq!(surface.caret_offset(), 3);
    surface.set_editable(false);
    assert!(!surface.is_editable());
    surface.set_text("a");
    assert_eq!(surface.caret_offset(), 1);
}
