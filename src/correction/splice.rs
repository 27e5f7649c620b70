use std::iter;

use crate::domain::text::Correction;

/// Applies corrections back to front so earlier char offsets stay valid.
///
/// Returns `None` when any correction is out of range, overlaps another one or no
/// longer matches the text it was computed from. Nothing is applied in that case.
pub fn splice_corrections(text: &str, corrections: &[Correction]) -> Option<String> {
    // Byte offset of every char boundary, including the end of the text.
    let boundaries: Vec<usize> = text
        .char_indices()
        .map(|(byte, _)| byte)
        .chain(iter::once(text.len()))
        .collect();
    let char_len = boundaries.len() - 1;

    let mut ordered: Vec<&Correction> = corrections.iter().collect();
    ordered.sort_by(|a, b| b.start.cmp(&a.start));

    let mut limit = char_len;
    for c in &ordered {
        if c.start > c.end || c.end > limit {
            tracing::warn!(start = c.start, end = c.end, "correction out of range or overlapping");
            return None;
        }
        if text[boundaries[c.start]..boundaries[c.end]] != *c.original {
            tracing::warn!(original = %c.original, start = c.start, "correction no longer matches text");
            return None;
        }
        limit = c.start;
    }

    let mut out = text.to_owned();
    for c in ordered {
        out.replace_range(boundaries[c.start]..boundaries[c.end], &c.converted);
    }
    Some(out)
}
