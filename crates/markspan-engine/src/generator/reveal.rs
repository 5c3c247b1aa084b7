use std::collections::HashSet;

use crate::rules::Rule;
use crate::style::AttrSet;

/// Allocates tap ids and picks base vs. revealed styling.
///
/// Ids are allocated only when a match is accepted, never for rejected
/// candidates, so they stay stable for edits that don't change which matches
/// come earlier. The counter is shared across all rules of one `generate`
/// call: ids run rule-major, position-minor.
pub(crate) struct TapAssigner<'a> {
    next: u32,
    /// `None` means no reveal tracking was supplied: treat everything as
    /// revealed (the editing-surface posture).
    revealed: Option<&'a HashSet<u32>>,
}

impl<'a> TapAssigner<'a> {
    pub fn new(revealed: Option<&'a HashSet<u32>>) -> Self {
        Self { next: 0, revealed }
    }

    /// Style and tap id for one accepted match of `rule`.
    pub fn style_for(&mut self, rule: &Rule) -> (AttrSet, Option<u32>) {
        let Some(reveal_style) = &rule.reveal_style else {
            return (rule.style.clone(), None);
        };
        let tap_id = self.next;
        self.next += 1;
        let is_revealed = self.revealed.is_none_or(|ids| ids.contains(&tap_id));
        let style = if is_revealed {
            reveal_style.clone()
        } else {
            rule.style.clone()
        };
        (style, Some(tap_id))
    }
}
