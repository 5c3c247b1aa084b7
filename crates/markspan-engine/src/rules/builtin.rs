//! The builtin rule catalogue and preset orderings.
//!
//! Delimiter tokens live here, not in the matcher: the matcher only ever
//! sees whatever tokens a rule carries.

use super::Rule;
use crate::style::{Attr, AttrSet, TextScale, Tint, Weight};

pub fn bold() -> Rule {
    Rule::paired("**", "**", AttrSet::new().with(Attr::Weight(Weight::Bold)))
}

pub fn italic_asterisk() -> Rule {
    Rule::paired("*", "*", AttrSet::new().with(Attr::Oblique(0.2)))
}

pub fn italic_underscore() -> Rule {
    Rule::paired("_", "_", AttrSet::new().with(Attr::Oblique(0.2)))
}

pub fn underline() -> Rule {
    Rule::paired("__", "__", AttrSet::new().with(Attr::Underline(true)))
}

pub fn strikethrough() -> Rule {
    Rule::paired("~~", "~~", AttrSet::new().with(Attr::Strikethrough(true)))
}

pub fn warning() -> Rule {
    Rule::paired(
        "/!\\",
        "/!\\",
        AttrSet::new().with(Attr::Foreground(Tint::Red)),
    )
}

/// Single-backtick inline code. Raw: content is never re-matched and the
/// close backtick is found verbatim even after a backslash.
pub fn code() -> Rule {
    Rule::paired("`", "`", inline_code_style()).raw()
}

/// Double-backtick inline code, for content that itself contains a backtick.
pub fn code2() -> Rule {
    Rule::paired("``", "``", inline_code_style()).raw()
}

/// Triple-backtick fenced code. The only builtin whose close token may sit
/// past a line break.
pub fn code_block() -> Rule {
    Rule::paired("```", "```", inline_code_style()).raw().multiline()
}

/// `> ` quote covering the rest of the line.
pub fn block_quote() -> Rule {
    Rule::until_line_end("> ", block_quote_style())
}

/// `>>> ` quote covering the rest of the document.
pub fn block_quote_until_end() -> Rule {
    Rule::until_document_end(">>> ", block_quote_style())
}

pub fn header1() -> Rule {
    Rule::until_line_end("# ", header_style(TextScale::Title1, 28.0))
}

pub fn header2() -> Rule {
    Rule::until_line_end("## ", header_style(TextScale::Title2, 22.0))
}

pub fn header3() -> Rule {
    Rule::until_line_end("### ", header_style(TextScale::Title3, 20.0))
}

/// Reddit-style spoiler: `>!hidden!<`.
pub fn spoiler_reddit() -> Rule {
    Rule::paired(">!", "!<", spoiler_style()).revealed(spoiler_revealed_style())
}

/// Discord-style spoiler: `||hidden||`.
pub fn spoiler_discord() -> Rule {
    Rule::paired("||", "||", spoiler_style()).revealed(spoiler_revealed_style())
}

/// Cover style: text painted in its own background color, unreadable until
/// revealed.
fn spoiler_style() -> AttrSet {
    AttrSet::new()
        .with(Attr::Background(Tint::Gray))
        .with(Attr::Foreground(Tint::Gray))
}

fn spoiler_revealed_style() -> AttrSet {
    AttrSet::new()
        .with(Attr::Background(Tint::GrayLight))
        .with(Attr::Foreground(Tint::Label))
}

fn inline_code_style() -> AttrSet {
    AttrSet::new()
        .with(Attr::Monospace(true))
        .with(Attr::Background(Tint::Surface))
}

fn block_quote_style() -> AttrSet {
    AttrSet::new().with(Attr::Inset(Tint::Gray))
}

fn header_style(scale: TextScale, size: f32) -> AttrSet {
    AttrSet::new()
        .with(Attr::Scale(scale))
        .with(Attr::Size(size))
}

/// The inline rules every preset shares, in precedence order. Longer tokens
/// come before their prefixes (`` `` `` before `` ` ``, `__` before `_`) so
/// the longer form claims its delimiters first.
pub fn basic_inlines() -> Vec<Rule> {
    vec![
        code2(),
        code(),
        bold(),
        underline(),
        strikethrough(),
        italic_asterisk(),
        italic_underscore(),
    ]
}

pub fn headers() -> Vec<Rule> {
    vec![header1(), header2(), header3()]
}

/// The standard preset: headers, quotes, fenced code, the basic inlines,
/// Reddit spoilers and warnings.
pub fn standard_rules() -> Vec<Rule> {
    let mut rules = headers();
    rules.extend([block_quote_until_end(), block_quote(), code_block()]);
    rules.extend(basic_inlines());
    rules.extend([spoiler_reddit(), warning()]);
    rules
}

/// Discord-flavored preset: no headers, `||` spoilers.
pub fn discord_rules() -> Vec<Rule> {
    let mut rules = vec![block_quote_until_end(), block_quote(), code_block()];
    rules.extend(basic_inlines());
    rules.push(spoiler_discord());
    rules
}
