//! Markup rule definitions and validation.
//!
//! A [`Rule`] describes one markup pattern: an open token, a terminator
//! (an explicit close token, or a positional end for block rules), the style
//! applied to matched content, and flags controlling raw content and line
//! crossing. Rules are applied strictly in list order; see
//! [`crate::generator`] for the matching semantics.

pub mod builtin;

use crate::style::AttrSet;
use thiserror::Error;

/// Where a rule's match ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Terminator {
    /// An explicit close token, e.g. the second `**` of `**bold**`.
    Token(String),
    /// The match runs to the next line break. Block rule: the open token
    /// must sit at the start of a line.
    EndOfLine,
    /// The match runs to the end of the document. Block rule: the open token
    /// must sit at the start of a line.
    EndOfDocument,
}

/// One markup pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    /// The open token. Never empty in a validated [`RuleSet`].
    pub open: String,
    pub terminator: Terminator,
    /// Style applied to matched content.
    pub style: AttrSet,
    /// Style applied instead of `style` once the span's tap id is revealed.
    /// Present iff the rule is interactive (spoilers).
    pub reveal_style: Option<AttrSet>,
    /// Raw content: never re-matched by later rules, exempt from escape
    /// processing, and the close token is found verbatim even after a
    /// backslash.
    pub raw: bool,
    /// Whether an explicit close token may be found past a line break.
    pub multiline: bool,
}

impl Rule {
    /// A rule with an explicit close token.
    pub fn paired(open: impl Into<String>, close: impl Into<String>, style: AttrSet) -> Self {
        Self {
            open: open.into(),
            terminator: Terminator::Token(close.into()),
            style,
            reveal_style: None,
            raw: false,
            multiline: false,
        }
    }

    /// A block rule ending at the next line break.
    pub fn until_line_end(open: impl Into<String>, style: AttrSet) -> Self {
        Self {
            open: open.into(),
            terminator: Terminator::EndOfLine,
            style,
            reveal_style: None,
            raw: false,
            multiline: false,
        }
    }

    /// A block rule ending at the end of the document.
    pub fn until_document_end(open: impl Into<String>, style: AttrSet) -> Self {
        Self {
            open: open.into(),
            terminator: Terminator::EndOfDocument,
            style,
            reveal_style: None,
            raw: false,
            multiline: false,
        }
    }

    /// Marks the matched content as raw.
    #[must_use]
    pub fn raw(mut self) -> Self {
        self.raw = true;
        self
    }

    /// Allows the close token search to cross line breaks.
    #[must_use]
    pub fn multiline(mut self) -> Self {
        self.multiline = true;
        self
    }

    /// Makes the rule interactive: matched spans get a tap id and switch to
    /// `style` once revealed.
    #[must_use]
    pub fn revealed(mut self, style: AttrSet) -> Self {
        self.reveal_style = Some(style);
        self
    }

    /// Block rules end positionally and must open at the start of a line.
    pub fn is_block(&self) -> bool {
        matches!(
            self.terminator,
            Terminator::EndOfLine | Terminator::EndOfDocument
        )
    }

    pub fn is_interactive(&self) -> bool {
        self.reveal_style.is_some()
    }
}

/// Rule list misconfiguration, rejected when the list is assembled.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("rule {index} has an empty open token")]
    EmptyOpen { index: usize },
    #[error(
        "rule {index} ({open:?}) has an empty close token; use an end-of-document terminator instead"
    )]
    EmptyClose { index: usize, open: String },
    #[error(
        "raw rule {index} ({open:?}) is listed after a styled inline rule; raw rules must come first so their content is protected from re-matching"
    )]
    RawAfterStyled { index: usize, open: String },
}

/// An ordered, validated list of rules.
///
/// Validation happens once at construction; `generate` never fails on rule
/// configuration afterwards.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Result<Self, RuleError> {
        let mut seen_styled_inline = false;
        for (index, rule) in rules.iter().enumerate() {
            if rule.open.is_empty() {
                return Err(RuleError::EmptyOpen { index });
            }
            if matches!(&rule.terminator, Terminator::Token(t) if t.is_empty()) {
                return Err(RuleError::EmptyClose {
                    index,
                    open: rule.open.clone(),
                });
            }
            if rule.raw && seen_styled_inline {
                return Err(RuleError::RawAfterStyled {
                    index,
                    open: rule.open.clone(),
                });
            }
            if !rule.raw && !rule.is_block() {
                seen_styled_inline = true;
            }
        }
        Ok(Self { rules })
    }

    /// Constructor for rule lists known to satisfy the validation rules
    /// (the builtin presets).
    pub(crate) fn from_validated(rules: Vec<Rule>) -> Self {
        debug_assert!(Self::new(rules.clone()).is_ok());
        Self { rules }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
