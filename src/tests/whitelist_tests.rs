use proptest::{collection::vec, prelude::*, sample::select};

use crate::{
    domain::{
        outcome::SkipReason,
        text::{
            Analyzer, Thresholds, Verdict, classify,
            classify::{ARABIC_SINGLE_WORDS, Assessment, ENGLISH_SINGLE_WORDS, assess_word},
        },
    },
    tests::support::{engine, focused_page, text_of},
};

#[test]
fn single_letter_words_are_whitelisted() {
    for &ch in ENGLISH_SINGLE_WORDS.iter().chain(ARABIC_SINGLE_WORDS) {
        let word = ch.to_string();
        let converted = layout_fixer_core::convert(&word);
        assert_eq!(classify(&word, &converted), Verdict::Whitelisted, "{word}");
    }
}

#[test]
fn other_single_letters_are_accepted() {
    assert_eq!(classify("ض", "q"), Verdict::Accept);
    assert_eq!(classify("q", "ض"), Verdict::Accept);
    assert_eq!(classify("5", "5"), Verdict::Unchanged);
    assert_eq!(classify("!", "؟"), Verdict::NotALetter);
}

#[test]
fn caret_fix_leaves_arabic_conjunction_alone() {
    let (mut engine, _clock) = engine();
    let (mut page, id) = focused_page("و");
    assert_eq!(
        engine.fix_current_word(&mut page).skip_reason(),
        Some(SkipReason::Whitelisted)
    );
    assert_eq!(text_of(&page, id), "و");
    assert!(!engine.can_undo());
}

#[test]
fn single_letters_do_not_count_in_buffer_analysis() {
    assert_eq!(assess_word("I"), Assessment::Skipped);
    assert_eq!(assess_word("ب"), Assessment::Skipped);
}

const WRONG: &[&str] = &["فاث", "صخقمي", "هس", "لخخي", "اثممخ", "lvpfh"];
const SINGLES: &[char] = &['a', 'A', 'I', 'و', 'أ', 'ب', 'ل', 'ك', 'ف'];

proptest! {
    #[test]
    fn whitelisted_letters_never_become_corrections(
        picks in vec((select(WRONG.to_vec()), any::<bool>(), select(SINGLES.to_vec())), 1..8)
    ) {
        let mut parts = Vec::new();
        for (word, with_single, single) in picks {
            parts.push(word.to_owned());
            if with_single {
                parts.push(single.to_string());
            }
        }
        let text = parts.join(" ");
        let analysis = Analyzer::new(Thresholds::default()).analyze(&text);
        for c in &analysis.corrections {
            prop_assert!(c.original.chars().count() > 1, "corrected {:?}", c.original);
        }
    }
}
