//! Marker tag location in free-form model output.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

// First open tag and the first close tag after it. Case-insensitive, spans lines.
static ANSWER_PAIR: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<ans>(.*?)</ans>").unwrap());
static EXPLANATION_PAIR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<exp>(.*?)</exp>").unwrap());

static ANY_OPEN_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<(ans|exp)>").unwrap());
static STRAY_MARKUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)</?\s*(ans|exp)\s*>").unwrap());

// Standalone uppercase option letter.
static LETTER_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b([ABCD])\b").unwrap());

/// Which marker pair to look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Answer,
    Explanation,
}

impl Marker {
    fn pattern(self) -> &'static Regex {
        match self {
            Marker::Answer => &ANSWER_PAIR,
            Marker::Explanation => &EXPLANATION_PAIR,
        }
    }
}

/// Location of one `<tag>…</tag>` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSpan {
    /// Byte range including both tags.
    pub outer: Range<usize>,
    /// Byte range of the content between the tags.
    pub inner: Range<usize>,
}

impl TagSpan {
    pub fn content<'a>(&self, text: &'a str) -> &'a str {
        &text[self.inner.clone()]
    }
}

/// Find the first pair of the given marker. Later pairs are ignored.
pub fn find_pair(text: &str, marker: Marker) -> Option<TagSpan> {
    let caps = marker.pattern().captures(text)?;
    let outer = caps.get(0)?.range();
    let inner = caps.get(1)?.range();
    Some(TagSpan { outer, inner })
}

/// Byte offset of the first opening marker of any kind.
pub fn first_open_marker(text: &str) -> Option<usize> {
    ANY_OPEN_MARKER.find(text).map(|m| m.start())
}

/// Remove any leftover marker tags (unpaired or malformed).
///
/// Repeats until nothing matches, since removing `<ans>` from `<<ans>ans>`
/// leaves a fresh tag behind.
pub fn strip_markup(text: &str) -> String {
    let mut out = text.to_string();
    while STRAY_MARKUP.is_match(&out) {
        out = STRAY_MARKUP.replace_all(&out, "").into_owned();
    }
    out
}

/// Remove the given byte ranges from `text`. Overlapping ranges are merged.
pub fn cut_ranges(text: &str, mut ranges: Vec<Range<usize>>) -> String {
    ranges.sort_by_key(|r| r.start);

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for range in ranges {
        if range.start > cursor {
            out.push_str(&text[cursor..range.start]);
        }
        cursor = cursor.max(range.end);
    }
    if cursor < text.len() {
        out.push_str(&text[cursor..]);
    }
    out
}

/// First standalone A/B/C/D token in `text`.
pub fn scan_letter(text: &str) -> Option<&str> {
    LETTER_TOKEN
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
