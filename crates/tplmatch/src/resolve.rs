//! Turning overlapping candidates into a clean, ordered match list.

use crate::scan::CandidateMatch;

/// Keeps a non-overlapping subset of `candidates`, ordered by position.
///
/// Candidates are sorted by start ascending and, at equal starts, by length
/// descending; the sweep then accepts every candidate that begins at or
/// after the end of the last accepted one. Equal candidates keep their scan
/// order, so earlier templates win exact ties.
pub fn resolve<'t, T>(mut candidates: Vec<CandidateMatch<'t, T>>) -> Vec<CandidateMatch<'t, T>> {
    candidates.sort_by(|a, b| a.start.cmp(&b.start).then(b.len.cmp(&a.len)));

    let mut accepted = Vec::with_capacity(candidates.len());
    let mut last_end = 0;

    for candidate in candidates {
        if candidate.start >= last_end {
            last_end = candidate.end();
            accepted.push(candidate);
        }
    }

    accepted
}

/// A piece of highlighted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Span<'s> {
    Plain(&'s str),
    /// Text covered by `matches[index]`.
    Matched { text: &'s str, index: usize },
}

/// Splits `text` into plain and matched spans.
///
/// Expects `matches` as returned by [`resolve`]; anything overlapping an
/// earlier match or outside `text` is left as plain text.
pub fn highlight<'s, T>(text: &'s str, matches: &[CandidateMatch<'_, T>]) -> Vec<Span<'s>> {
    let mut spans = Vec::new();
    let mut cursor = 0;

    for (index, m) in matches.iter().enumerate() {
        if m.start < cursor {
            continue;
        }
        let (Some(before), Some(covered)) = (text.get(cursor..m.start), text.get(m.start..m.end()))
        else {
            continue;
        };

        if !before.is_empty() {
            spans.push(Span::Plain(before));
        }
        spans.push(Span::Matched {
            text: covered,
            index,
        });
        cursor = m.end();
    }

    if cursor < text.len() {
        spans.push(Span::Plain(&text[cursor..]));
    }

    spans
}
