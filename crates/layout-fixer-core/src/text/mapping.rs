// File: src/text/mapping.rs

/// Direction of text conversion between the Arabic and English QWERTY layouts.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ConversionDirection {
    ArToEn,
    EnToAr,
}

/// Letter script of a single character.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Script {
    Arabic,
    Latin,
}

impl Script {
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Script::Arabic => Script::Latin,
            Script::Latin => Script::Arabic,
        }
    }
}

/// The `b` key produces lam followed by alef on the Arabic layout.
pub const LAM_ALEF: &str = "لا";
pub const LAM_ALEF_KEY: char = 'b';

#[must_use]
pub const fn is_latin_letter(ch: char) -> bool {
    ch.is_ascii_alphabetic()
}

/// Arabic base letters (hamza through yeh, plus the extended Arabic-script letters).
///
/// Tatweel and harakat are not letters.
#[must_use]
pub const fn is_arabic_letter(ch: char) -> bool {
    matches!(ch, '\u{0621}'..='\u{063A}' | '\u{0641}'..='\u{064A}' | '\u{0671}'..='\u{06D3}')
}

#[must_use]
pub const fn script_of_char(ch: char) -> Option<Script> {
    if is_arabic_letter(ch) {
        Some(Script::Arabic)
    } else if is_latin_letter(ch) {
        Some(Script::Latin)
    } else {
        None
    }
}

/// True when any character falls in the Arabic block.
#[must_use]
pub fn has_arabic(text: &str) -> bool {
    text.chars().any(|ch| ('\u{0600}'..='\u{06FF}').contains(&ch))
}

const fn map_ar_to_en(ch: char) -> Option<char> {
    let mapped = match ch {
        'ض' => 'q',
        'ص' => 'w',
        'ث' => 'e',
        'ق' => 'r',
        'ف' => 't',
        'غ' => 'y',
        'ع' => 'u',
        'ه' => 'i',
        'خ' => 'o',
        'ح' => 'p',
        'ج' => '[',
        'د' => ']',
        'ش' => 'a',
        'س' => 's',
        'ي' => 'd',
        'ب' => 'f',
        'ل' => 'g',
        'ا' => 'h',
        'ت' => 'j',
        'ن' => 'k',
        'م' => 'l',
        'ك' => ';',
        'ط' => '\'',
        'ئ' => 'z',
        'ء' => 'x',
        'ؤ' => 'c',
        'ر' => 'v',
        'ى' => 'n',
        'ة' => 'm',
        'و' => ',',
        'ز' => '.',
        'ظ' => '/',
        'ذ' => '`',

        // shifted keys
        'إ' => 'Y',
        'أ' => 'T',
        'آ' => 'U',
        '؟' => '?',
        '،' => '&',
        _ => return None,
    };
    Some(mapped)
}

const fn map_en_to_ar(ch: char) -> Option<char> {
    let mapped = match ch {
        'q' => 'ض',
        'w' => 'ص',
        'e' => 'ث',
        'r' => 'ق',
        't' => 'ف',
        'y' => 'غ',
        'u' => 'ع',
        'i' => 'ه',
        'o' => 'خ',
        'p' => 'ح',
        '[' => 'ج',
        ']' => 'د',
        'a' => 'ش',
        's' => 'س',
        'd' => 'ي',
        'f' => 'ب',
        'g' => 'ل',
        'h' => 'ا',
        'j' => 'ت',
        'k' => 'ن',
        'l' => 'م',
        ';' => 'ك',
        '\'' => 'ط',
        'z' => 'ئ',
        'x' => 'ء',
        'c' => 'ؤ',
        'v' => 'ر',
        'n' => 'ى',
        'm' => 'ة',
        ',' => 'و',
        '.' => 'ز',
        '/' => 'ظ',
        '`' => 'ذ',

        // shifted keys with a distinct Arabic character
        'Y' => 'إ',
        'T' => 'أ',
        'U' => 'آ',
        '?' => '؟',
        '&' => '،',
        _ => return None,
    };
    Some(mapped)
}

/// Arabic characters that have a single-character English counterpart.
pub const ARABIC_KEYS: &[char] = &[
    'ض', 'ص', 'ث', 'ق', 'ف', 'غ', 'ع', 'ه', 'خ', 'ح', 'ج', 'د', 'ش', 'س', 'ي', 'ب', 'ل', 'ا', 'ت',
    'ن', 'م', 'ك', 'ط', 'ئ', 'ء', 'ؤ', 'ر', 'ى', 'ة', 'و', 'ز', 'ظ', 'ذ', 'إ', 'أ', 'آ', '؟',
    '،',
];

/// English characters that have a single-character Arabic counterpart (`b` is the digraph key).
pub const ENGLISH_KEYS: &[char] = &[
    'q', 'w', 'e', 'r', 't', 'y', 'u', 'i', 'o', 'p', '[', ']', 'a', 's', 'd', 'f', 'g', 'h', 'j',
    'k', 'l', ';', '\'', 'z', 'x', 'c', 'v', 'n', 'm', ',', '.', '/', '`', 'Y', 'T', 'U', '?',
    '&',
];

/// Returns the conversion direction for a piece of text.
///
/// Anything carrying Arabic-block characters is treated as Arabic typed by mistake;
/// everything else converts towards Arabic.
#[must_use]
pub fn direction_for_text(text: &str) -> ConversionDirection {
    if has_arabic(text) {
        ConversionDirection::ArToEn
    } else {
        ConversionDirection::EnToAr
    }
}

/// Converts text between the Arabic and English keyboard layouts in the given direction.
///
/// The lam-alef digraph collapses to `b` going to English and `b` expands to it going
/// to Arabic, so this is not a per-character map. Unmapped characters pass through.
#[must_use]
pub fn convert_with_direction(text: &str, direction: ConversionDirection) -> String {
    // Arabic letters take two UTF-8 bytes, English ones take one.
    let mut out = match direction {
        ConversionDirection::ArToEn => String::with_capacity(text.len()),
        ConversionDirection::EnToAr => String::with_capacity(text.len().saturating_mul(2)),
    };
    match direction {
        ConversionDirection::ArToEn => {
            let mut chars = text.chars().peekable();
            while let Some(ch) = chars.next() {
                if ch == 'ل' && chars.peek() == Some(&'ا') {
                    chars.next();
                    out.push(LAM_ALEF_KEY);
                    continue;
                }
                out.push(map_ar_to_en(ch).unwrap_or(ch));
            }
        }
        ConversionDirection::EnToAr => {
            for ch in text.chars() {
                if ch.eq_ignore_ascii_case(&LAM_ALEF_KEY) {
                    out.push_str(LAM_ALEF);
                    continue;
                }
                // Upper-case keys without their own Arabic character fold to lower case.
                let mapped = map_en_to_ar(ch).or_else(|| map_en_to_ar(ch.to_ascii_lowercase()));
                out.push(mapped.unwrap_or(ch));
            }
        }
    }
    out
}

/// Auto-detects the direction and converts.
#[must_use]
pub fn convert(text: &str) -> String {
    convert_with_direction(text, direction_for_text(text))
}
