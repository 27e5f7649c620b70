//! Whitespace word boundaries over a text snapshot.
//!
//! Offsets are char indices into the exact snapshot that was segmented. Any edit
//! invalidates them, so every detection pass segments afresh.

/// A contiguous non-whitespace span of a buffer snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Word {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

impl Word {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SegmentMode {
    Caret(usize),
    All,
}

pub fn segment(text: &str, mode: SegmentMode) -> Vec<Word> {
    match mode {
        SegmentMode::Caret(caret) => word_at(text, caret).into_iter().collect(),
        SegmentMode::All => words(text),
    }
}

/// Returns the word touching `caret`, scanning both ways until whitespace.
///
/// A caret right after the last letter of a word still selects that word.
pub fn word_at(text: &str, caret: usize) -> Option<Word> {
    let chars: Vec<char> = text.chars().collect();
    let caret = caret.min(chars.len());

    let mut start = caret;
    while start > 0 && !chars[start - 1].is_whitespace() {
        start -= 1;
    }
    let mut end = caret;
    while end < chars.len() && !chars[end].is_whitespace() {
        end += 1;
    }

    if start == end {
        return None;
    }
    Some(Word {
        text: chars[start..end].iter().collect(),
        start,
        end,
    })
}

/// Splits on runs of whitespace, keeping offsets into the unsplit buffer.
pub fn words(text: &str) -> Vec<Word> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut start = 0usize;

    for (idx, ch) in text.chars().enumerate() {
        if ch.is_whitespace() {
            if !current.is_empty() {
                out.push(Word {
                    text: std::mem::take(&mut current),
                    start,
                    end: idx,
                });
            }
            continue;
        }
        if current.is_empty() {
            start = idx;
        }
        current.push(ch);
    }

    if !current.is_empty() {
        let end = start + current.chars().count();
        out.push(Word {
            text: current,
            start,
            end,
        });
    }
    out
}
