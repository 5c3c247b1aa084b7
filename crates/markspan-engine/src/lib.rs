pub mod generator;
pub mod rules;
pub mod style;

// Re-export key types for easier usage
pub use generator::span::Span;
pub use generator::{Generator, SpecifierPolicy, StyledSpan, StyledText};
pub use rules::{Rule, RuleError, RuleSet, Terminator};
pub use style::{Attr, AttrKey, AttrSet, TextScale, Tint, Weight};
