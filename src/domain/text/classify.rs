use layout_fixer_core::text::mapping::{
    ConversionDirection, Script, convert_with_direction, direction_for_text, script_of_char,
};

use super::plausible::{is_known_word, plausible_in};

/// Single letters that are words in their own right and are never corrected away.
pub const ENGLISH_SINGLE_WORDS: &[char] = &['a', 'A', 'I'];
pub const ARABIC_SINGLE_WORDS: &[char] = &['و', 'أ', 'ب', 'ل', 'ك', 'ف'];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    Accept,
    Unchanged,
    Whitelisted,
    NotALetter,
}

impl Verdict {
    pub fn is_accept(self) -> bool {
        self == Verdict::Accept
    }
}

pub fn is_whitelisted_single(ch: char) -> bool {
    match script_of_char(ch) {
        Some(Script::Latin) => ENGLISH_SINGLE_WORDS.contains(&ch),
        Some(Script::Arabic) => ARABIC_SINGLE_WORDS.contains(&ch),
        None => false,
    }
}

/// Decides whether `converted` should replace `word`.
pub fn classify(word: &str, converted: &str) -> Verdict {
    if word == converted {
        return Verdict::Unchanged;
    }
    let mut chars = word.chars();
    if let (Some(ch), None) = (chars.next(), chars.next()) {
        if script_of_char(ch).is_none() {
            return Verdict::NotALetter;
        }
        if is_whitelisted_single(ch) {
            return Verdict::Whitelisted;
        }
    }
    Verdict::Accept
}

pub fn is_mismatch(word: &str, converted: &str) -> bool {
    classify(word, converted).is_accept()
}

/// Letter makeup of a word.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WordScript {
    Single(Script),
    Mixed,
    NoLetters,
}

pub fn letter_counts(word: &str) -> (usize, usize) {
    let mut arabic = 0usize;
    let mut latin = 0usize;
    for ch in word.chars() {
        match script_of_char(ch) {
            Some(Script::Arabic) => arabic += 1,
            Some(Script::Latin) => latin += 1,
            None => {}
        }
    }
    (arabic, latin)
}

pub fn word_script(word: &str) -> WordScript {
    match letter_counts(word) {
        (0, 0) => WordScript::NoLetters,
        (_, 0) => WordScript::Single(Script::Arabic),
        (0, _) => WordScript::Single(Script::Latin),
        _ => WordScript::Mixed,
    }
}

/// How a whitespace-delimited word counts towards a whole-buffer decision.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Assessment {
    /// Fewer than two letters; not counted at all.
    Skipped,
    Mixed,
    Valid(Script),
    Wrong {
        script: Script,
        converted: String,
        direction: ConversionDirection,
    },
    Unknown(Script),
}

/// Strips non-letters from both ends; interior key characters stay.
pub fn letter_core(word: &str) -> &str {
    word.trim_matches(|ch: char| script_of_char(ch).is_none())
}

pub fn assess_word(word: &str) -> Assessment {
    let (arabic, latin) = letter_counts(word);
    if arabic + latin < 2 {
        return Assessment::Skipped;
    }
    let script = match word_script(word) {
        WordScript::Single(script) => script,
        WordScript::Mixed => return Assessment::Mixed,
        WordScript::NoLetters => return Assessment::Skipped,
    };

    let direction = direction_for_text(word);
    let converted = convert_with_direction(word, direction);
    if !is_mismatch(word, &converted) {
        return Assessment::Valid(script);
    }

    let target = script.other();
    let core = letter_core(word);
    let converted_core = convert_with_direction(core, direction);
    if is_known_word(core, script) {
        return Assessment::Valid(script);
    }
    let wrong = || Assessment::Wrong {
        script,
        converted: converted.clone(),
        direction,
    };
    if is_known_word(&converted, target) || is_known_word(&converted_core, target) {
        return wrong();
    }

    match (plausible_in(core, script), plausible_in(&converted, target)) {
        (true, _) => Assessment::Valid(script),
        (false, true) => wrong(),
        (false, false) => Assessment::Unknown(script),
    }
}

/// Cheap own-script check used before the full per-word pass.
pub fn looks_valid_as_typed(word: &str, script: Script) -> bool {
    let core = letter_core(word);
    if is_known_word(core, script) {
        return true;
    }
    let direction = direction_for_text(word);
    plausible_in(core, script)
        && !is_known_word(&convert_with_direction(word, direction), script.other())
        && !is_known_word(&convert_with_direction(core, direction), script.other())
}
