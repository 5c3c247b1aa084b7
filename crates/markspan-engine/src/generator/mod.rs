//! The generator: orchestrates rule matching, escape resolution and
//! specifier resolution over one input string.
//!
//! A [`Generator`] is immutable after construction and holds no per-call
//! state, so one instance can serve concurrent `generate` calls on
//! different inputs without synchronization.

mod escapes;
mod exclusions;
mod matcher;
mod resolve;
mod reveal;
mod scan;
pub mod span;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::rules::{RuleSet, builtin};
use crate::style::{Attr, AttrSet, Tint, Weight};
use exclusions::Exclusions;
use reveal::TapAssigner;
use span::Span;

/// What happens to delimiter characters in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpecifierPolicy {
    /// Delimiters are removed from the output text; spans are renumbered
    /// into the shortened coordinate space. The reading posture.
    #[default]
    Delete,
    /// Delimiters stay in the text and receive a fixed overlay style. The
    /// editing posture: the user still sees and can edit the raw markup.
    Keep,
}

/// One styled region of the output text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyledSpan {
    pub span: Span,
    pub attrs: AttrSet,
    /// Present iff the span belongs to an interactive rule. Correlates the
    /// span with externally tracked revealed state across calls.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tap_id: Option<u32>,
}

/// Output of one `generate` call.
///
/// Spans may overlap (an italic region inside a bold one); where they do,
/// later spans win conflicting attribute keys when merged for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyledText {
    pub text: String,
    pub spans: Vec<StyledSpan>,
}

/// Converts plain text with markup tokens into styled spans, applying its
/// rules strictly in list order.
#[derive(Debug, Clone)]
pub struct Generator {
    rules: RuleSet,
    policy: SpecifierPolicy,
    specifier_style: AttrSet,
}

impl Generator {
    pub fn new(rules: RuleSet) -> Self {
        Self {
            rules,
            policy: SpecifierPolicy::default(),
            specifier_style: default_specifier_style(),
        }
    }

    /// The standard preset: headers, quotes, fenced code, basic inlines,
    /// Reddit spoilers and warnings.
    pub fn standard() -> Self {
        Self::new(RuleSet::from_validated(builtin::standard_rules()))
    }

    /// Discord-flavored preset: no headers, `||` spoilers.
    pub fn discord() -> Self {
        Self::new(RuleSet::from_validated(builtin::discord_rules()))
    }

    /// Switches to the Keep policy: delimiters stay in the text, restyled
    /// with the specifier overlay.
    #[must_use]
    pub fn keeping_specifiers(mut self) -> Self {
        self.policy = SpecifierPolicy::Keep;
        self
    }

    /// Replaces the overlay style Keep mode applies to delimiters.
    #[must_use]
    pub fn with_specifier_style(mut self, style: AttrSet) -> Self {
        self.specifier_style = style;
        self
    }

    pub fn policy(&self) -> SpecifierPolicy {
        self.policy
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Runs every rule in list order to exhaustion, claims remaining
    /// escapes, then resolves specifiers per the active policy.
    ///
    /// `revealed` is the set of tap ids whose spans should use their reveal
    /// style; `None` treats every interactive span as revealed.
    pub fn generate(&self, text: &str, revealed: Option<&HashSet<u32>>) -> StyledText {
        let (spans, exclusions) = self.scan(text, revealed);
        resolve::resolve(text, spans, exclusions, self.policy, &self.specifier_style)
    }

    /// The matching phase: all rules, then the escape pass. Spans and
    /// claims come back in original input coordinates.
    fn scan(&self, text: &str, revealed: Option<&HashSet<u32>>) -> (Vec<StyledSpan>, Exclusions) {
        let mut exclusions = Exclusions::new();
        let mut spans = Vec::new();
        let mut taps = TapAssigner::new(revealed);
        for rule in self.rules.iter() {
            matcher::apply_rule(rule, text, &mut exclusions, &mut spans, &mut taps);
        }
        escapes::claim_escapes(text, &mut exclusions);
        (spans, exclusions)
    }
}

/// The overlay Keep mode paints over delimiter characters: muted foreground
/// and explicit resets of the content styling that would otherwise bleed
/// over them.
fn default_specifier_style() -> AttrSet {
    AttrSet::new()
        .with(Attr::Foreground(Tint::Gray))
        .with(Attr::Weight(Weight::Regular))
        .with(Attr::Oblique(0.0))
        .with(Attr::Underline(false))
        .with(Attr::Strikethrough(false))
}
