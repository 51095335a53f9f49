//! Plain-text measures: whitespace collapsing, clamping, reading time.
//!
//! All lengths are counted in `char`s.

const ELLIPSIS: &str = "...";

/// Collapse whitespace runs into single spaces and trim.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Clamp `text` to at most `max` chars, cutting at a word boundary and
/// appending `...` when shortened. A single word longer than the bound is
/// cut mid-word.
pub fn clamp(text: &str, max: usize) -> String {
    let text = collapse_whitespace(text);
    if text.chars().count() <= max {
        return text;
    }
    if max <= ELLIPSIS.len() {
        return text.chars().take(max).collect();
    }

    let budget = max - ELLIPSIS.len();
    let end = text
        .char_indices()
        .nth(budget)
        .map_or(text.len(), |(idx, _)| idx);
    let head = &text[..end];

    // keep whole words when the cut fell inside one
    let head = match text[end..].starts_with(' ') {
        true => head,
        false => head.rfind(' ').map_or(head, |space| &head[..space]),
    };

    let mut out = head.trim_end_matches([' ', ',', ';', ':', '.']).to_owned();
    out.push_str(ELLIPSIS);
    out
}

/// Whitespace-separated word count.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Minutes to read `words` at `words_per_minute`, rounded up.
///
/// Zero only for an empty document.
pub fn reading_time(words: usize, words_per_minute: usize) -> usize {
    words.div_ceil(words_per_minute.max(1))
}
