use layout_fixer_core::text::mapping::{Script, is_arabic_letter};

use super::lexicon;

const MAX_CONSONANT_RUN: usize = 4;

fn is_ascii_vowel(ch: char) -> bool {
    matches!(ch.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u')
}

fn is_arabic_long_vowel(ch: char) -> bool {
    matches!(ch, 'ا' | 'أ' | 'إ' | 'آ' | 'و' | 'ي' | 'ى' | 'ة')
}

fn looks_like_ascii_word(s: &str) -> bool {
    let bytes = s.as_bytes();
    if !bytes.iter().any(u8::is_ascii_alphabetic) {
        return false;
    }

    bytes.iter().copied().enumerate().all(|(i, b)| {
        if b.is_ascii_alphabetic() || b == b'\'' {
            return true;
        }
        // Allow a hyphen only between letters.
        b == b'-'
            && i > 0
            && i + 1 < bytes.len()
            && bytes[i - 1].is_ascii_alphabetic()
            && bytes[i + 1].is_ascii_alphabetic()
    })
}

/// English word shape: has a vowel, no long consonant clusters, few rare letters.
///
/// `y` counts as a consonant here to keep false positives down.
pub fn plausible_english(word: &str) -> bool {
    if !looks_like_ascii_word(word) {
        return false;
    }
    if lexicon::is_common_english(word) {
        return true;
    }
    if !word.chars().any(is_ascii_vowel) {
        return false;
    }

    let mut consonant_run = 0usize;
    let mut max_consonant_run = 0usize;
    let mut rare = 0usize;
    for ch in word.chars().filter(char::is_ascii_alphabetic) {
        if is_ascii_vowel(ch) {
            consonant_run = 0;
            continue;
        }
        consonant_run += 1;
        max_consonant_run = max_consonant_run.max(consonant_run);
        if matches!(ch.to_ascii_lowercase(), 'j' | 'q' | 'x' | 'z') {
            rare += 1;
        }
    }
    max_consonant_run <= MAX_CONSONANT_RUN && rare <= 1
}

/// Arabic word shape as produced by the Arabic layout.
///
/// Teh marbuta and alef maksura only end words, hamza forms never start them.
pub fn plausible_arabic(word: &str) -> bool {
    let letters: Vec<char> = word.chars().collect();
    if letters.is_empty() || !letters.iter().copied().all(is_arabic_letter) {
        return false;
    }
    if lexicon::is_common_arabic(word) {
        return true;
    }

    let last = letters.len() - 1;
    for (i, &ch) in letters.iter().enumerate() {
        match ch {
            'ة' | 'ى' if i != last => return false,
            'ء' | 'ؤ' | 'ئ' if i == 0 => return false,
            _ => {}
        }
    }
    if letters
        .windows(3)
        .any(|w| w[0] == w[1] && w[1] == w[2])
    {
        return false;
    }
    letters.len() < 4 || letters.iter().copied().any(is_arabic_long_vowel)
}

pub fn plausible_in(word: &str, script: Script) -> bool {
    match script {
        Script::Arabic => plausible_arabic(word),
        Script::Latin => plausible_english(word),
    }
}

pub fn is_known_word(word: &str, script: Script) -> bool {
    match script {
        Script::Arabic => lexicon::is_common_arabic(word),
        Script::Latin => lexicon::is_common_english(word),
    }
}
