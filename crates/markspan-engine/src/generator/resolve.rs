//! Specifier resolution: the last step of a `generate` call.
//!
//! Keep mode restyles the delimiter characters in place; Delete mode
//! physically removes them and renumbers every span into the shortened
//! coordinate space. Raw claims are never removed or restyled; they only
//! existed to protect content during matching.

use super::exclusions::{Exclusions, Reason};
use super::span::Span;
use super::{SpecifierPolicy, StyledSpan, StyledText};
use crate::style::AttrSet;

pub(crate) fn resolve(
    text: &str,
    spans: Vec<StyledSpan>,
    exclusions: Exclusions,
    policy: SpecifierPolicy,
    specifier_style: &AttrSet,
) -> StyledText {
    let specifiers: Vec<Span> = exclusions
        .into_sorted()
        .iter()
        .filter(|e| e.reason == Reason::Specifier)
        .map(|e| e.span)
        .collect();
    assert_disjoint(&specifiers);
    match policy {
        SpecifierPolicy::Keep => keep(text, spans, &specifiers, specifier_style),
        SpecifierPolicy::Delete => delete(text, spans, &specifiers),
    }
}

/// Candidate delimiters are rejected when they intersect an existing claim,
/// so specifier ranges are disjoint by construction. A violation would make
/// the Delete-mode shift arithmetic cut the wrong bytes, so fail loudly
/// instead. (Raw claims may legitimately straddle specifiers claimed before
/// them, e.g. a header marker inside a later-matched code fence; they are
/// never deleted, so they stay out of this check.)
fn assert_disjoint(specifiers: &[Span]) {
    for pair in specifiers.windows(2) {
        assert!(
            pair[0].end <= pair[1].start,
            "claimed ranges overlap: {:?} and {:?}",
            pair[0],
            pair[1],
        );
    }
}

/// Keep mode: text is unchanged; every specifier range gets an overlay span
/// appended after the content spans, so its attributes win the merge.
fn keep(
    text: &str,
    mut spans: Vec<StyledSpan>,
    specifiers: &[Span],
    specifier_style: &AttrSet,
) -> StyledText {
    for span in specifiers {
        spans.push(StyledSpan {
            span: *span,
            attrs: specifier_style.clone(),
            tap_id: None,
        });
    }
    StyledText {
        text: text.to_owned(),
        spans,
    }
}

/// Delete mode: specifier ranges are cut out of the text, and every span
/// boundary is shifted left by the total length cut before it.
fn delete(text: &str, spans: Vec<StyledSpan>, cuts: &[Span]) -> StyledText {
    let mut out = String::with_capacity(text.len());
    let mut from = 0;
    for cut in cuts {
        out.push_str(&text[from..cut.start]);
        from = cut.end;
    }
    out.push_str(&text[from..]);

    let spans = spans
        .into_iter()
        .map(|s| StyledSpan {
            span: Span::new(shifted(cuts, s.span.start), shifted(cuts, s.span.end)),
            ..s
        })
        .collect();

    StyledText { text: out, spans }
}

/// Maps a position in the original text into the post-deletion coordinate
/// space. `cuts` must be sorted and disjoint.
fn shifted(cuts: &[Span], pos: usize) -> usize {
    let mut removed = 0;
    for cut in cuts {
        if cut.start >= pos {
            break;
        }
        removed += cut.end.min(pos) - cut.start;
    }
    pos - removed
}
