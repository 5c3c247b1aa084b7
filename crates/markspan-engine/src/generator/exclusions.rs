use super::span::Span;

/// Why a range was claimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Reason {
    /// Delimiter token characters: deleted or restyled at resolution time.
    Specifier,
    /// Raw content: protected from further matching, never removed.
    Raw,
}

/// One claimed range of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Exclusion {
    pub span: Span,
    pub reason: Reason,
}

/// Accumulates the ranges already claimed by earlier matches.
///
/// A candidate delimiter that collides with any claimed range is rejected;
/// this is the whole precedence mechanism. Lookup is a linear scan, which is
/// fine for the rule counts and match counts this engine sees.
#[derive(Debug, Default)]
pub(crate) struct Exclusions {
    entries: Vec<Exclusion>,
}

impl Exclusions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn claim(&mut self, span: Span, reason: Reason) {
        self.entries.push(Exclusion { span, reason });
    }

    /// Does `span` share any byte with a claimed range?
    pub fn collides(&self, span: Span) -> bool {
        self.entries.iter().any(|e| e.span.intersects(span))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Exclusion> {
        self.entries.iter()
    }

    /// Consumes the tracker, returning entries ordered by start position.
    pub fn into_sorted(mut self) -> Vec<Exclusion> {
        self.entries.sort_by_key(|e| e.span.start);
        self.entries
    }
}
