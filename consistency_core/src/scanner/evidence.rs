//! Evidence excerpts.

/// Context kept around a match, in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExcerptWindow {
    pub before: usize,
    pub after: usize,
}

impl Default for ExcerptWindow {
    fn default() -> Self {
        Self {
            before: 60,
            after: 120,
        }
    }
}

/// Cut a verbatim window from `text` around the byte `offset`.
///
/// Keeps up to `before` characters preceding the offset and up to `after`
/// characters from the offset onwards. `offset` must lie on a char boundary, which
/// holds for every offset reported by the term matchers.
pub fn excerpt(text: &str, offset: usize, window: ExcerptWindow) -> &str {
    let offset = offset.min(text.len());

    let start = text[..offset]
        .char_indices()
        .rev()
        .take(window.before)
        .last()
        .map_or(offset, |(i, _)| i);
    let end = text[offset..]
        .char_indices()
        .nth(window.after)
        .map_or(text.len(), |(i, _)| offset + i);

    &text[start..end]
}

/// Collapse runs of whitespace so an excerpt fits on one rationale line.
pub(crate) fn single_line(excerpt: &str) -> String {
    excerpt.split_whitespace().collect::<Vec<_>>().join(" ")
}
