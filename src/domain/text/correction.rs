use layout_fixer_core::text::mapping::ConversionDirection;

use super::segment::Word;

/// One proposed replacement inside a specific buffer snapshot.
///
/// `start`/`end` are char offsets of `original` in that snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Correction {
    pub original: String,
    pub converted: String,
    pub start: usize,
    pub end: usize,
    pub direction: ConversionDirection,
}

impl Correction {
    pub fn for_word(word: &Word, converted: String, direction: ConversionDirection) -> Self {
        Self {
            original: word.text.clone(),
            converted,
            start: word.start,
            end: word.end,
            direction,
        }
    }
}
