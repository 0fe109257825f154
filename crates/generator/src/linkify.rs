//! Splitting description text into plain text and bare URLs.
//!
//! A URL is a run starting with `http://` or `https://` followed by at least
//! one non-whitespace character, extending up to the next whitespace.

/// A piece of description text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    Url(&'a str),
}

impl<'a> Segment<'a> {
    pub fn as_str(&self) -> &'a str {
        match self {
            Segment::Text(s) | Segment::Url(s) => s,
        }
    }
}

/// Split `text` into segments.
///
/// Concatenating the segments yields `text` exactly; empty text segments are
/// never produced.
pub fn segments(text: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut last = 0;

    while let Some((start, end)) = next_url(text, last) {
        if start > last {
            out.push(Segment::Text(&text[last..start]));
        }
        out.push(Segment::Url(&text[start..end]));
        last = end;
    }

    if last < text.len() {
        out.push(Segment::Text(&text[last..]));
    }

    out
}

/// Byte range of the first URL at or after `from`
fn next_url(text: &str, from: usize) -> Option<(usize, usize)> {
    for (offset, _) in text[from..].match_indices("http") {
        let start = from + offset;
        let rest = &text[start + 4..];
        let scheme_len = if rest.starts_with("s://") {
            8
        } else if rest.starts_with("://") {
            7
        } else {
            continue;
        };

        let body = start + scheme_len;
        let end = text[body..]
            .find(char::is_whitespace)
            .map_or(text.len(), |i| body + i);
        if end > body {
            return Some((start, end));
        }
    }
    None
}
