//! The per-rule matching loop.
//!
//! One rule is run to exhaustion over the full text before the next rule
//! starts. Every accepted match claims its delimiter ranges (and, for raw
//! rules, its content), so later rules can never reinterpret them: rule
//! order is the only precedence mechanism.

use super::exclusions::{Exclusions, Reason};
use super::reveal::TapAssigner;
use super::scan::{at_line_start, find_unclaimed, line_end};
use super::span::Span;
use super::StyledSpan;
use crate::rules::{Rule, Terminator};

/// Runs `rule` to exhaustion, appending accepted matches to `spans` and
/// their claims to `exclusions`.
pub(crate) fn apply_rule(
    rule: &Rule,
    text: &str,
    exclusions: &mut Exclusions,
    spans: &mut Vec<StyledSpan>,
    taps: &mut TapAssigner<'_>,
) {
    match &rule.terminator {
        Terminator::EndOfLine | Terminator::EndOfDocument => {
            apply_block_rule(rule, text, exclusions, spans, taps)
        }
        Terminator::Token(close) => apply_paired_rule(rule, close, text, exclusions, spans, taps),
    }
}

/// Block rules: the open token must sit at the start of a line; the match
/// covers the rest of the line (or document). Only the open token is a
/// specifier; the terminating line break stays part of the text.
fn apply_block_rule(
    rule: &Rule,
    text: &str,
    exclusions: &mut Exclusions,
    spans: &mut Vec<StyledSpan>,
    taps: &mut TapAssigner<'_>,
) {
    let mut pos = 0;
    loop {
        let Some(open) = find_unclaimed(text, &rule.open, exclusions, &mut pos, text.len(), false)
        else {
            return;
        };
        if !at_line_start(text, open.start) {
            // Mid-line occurrence is literal text; keep scanning after it.
            continue;
        }
        let stop = match rule.terminator {
            Terminator::EndOfLine => line_end(text, open.end),
            Terminator::EndOfDocument => text.len(),
            Terminator::Token(_) => unreachable!("block rules have positional terminators"),
        };
        let content = Span::new(open.end, stop);
        let (attrs, tap_id) = taps.style_for(rule);
        exclusions.claim(open, Reason::Specifier);
        if !content.is_empty() {
            if rule.raw {
                exclusions.claim(content, Reason::Raw);
            }
            spans.push(StyledSpan {
                span: content,
                attrs,
                tap_id,
            });
        }
    }
}

/// Explicit-terminator rules: find an open token, then a close token within
/// the allowed boundary. An open with no valid close, or with empty content,
/// stays literal text.
fn apply_paired_rule(
    rule: &Rule,
    close_token: &str,
    text: &str,
    exclusions: &mut Exclusions,
    spans: &mut Vec<StyledSpan>,
    taps: &mut TapAssigner<'_>,
) {
    // One cursor is shared between open and close searches: positions
    // rejected while looking for a close are never revisited as opens.
    let mut pos = 0;
    loop {
        let Some(open) = find_unclaimed(text, &rule.open, exclusions, &mut pos, text.len(), false)
        else {
            return;
        };
        let until = if rule.multiline {
            text.len()
        } else {
            line_end(text, open.end)
        };
        let Some(close) = find_unclaimed(text, close_token, exclusions, &mut pos, until, rule.raw)
        else {
            continue;
        };
        if close.start == open.end {
            // Zero-length content is not a match.
            continue;
        }
        let content = Span::new(open.end, close.start);
        let (attrs, tap_id) = taps.style_for(rule);
        exclusions.claim(open, Reason::Specifier);
        exclusions.claim(close, Reason::Specifier);
        if rule.raw {
            exclusions.claim(content, Reason::Raw);
        }
        spans.push(StyledSpan {
            span: content,
            attrs,
            tap_id,
        });
    }
}
