//! Maps the engine's semantic style attributes onto terminal styling.
//!
//! Spans may overlap; rendering flattens them into non-overlapping runs by
//! merging the attribute sets of every span covering a segment, in span
//! order, so later spans win conflicting keys.

use crossterm::style::{Attribute, Color, ContentStyle};
use markspan_engine::style::{Attr, AttrSet, TextScale, Tint, Weight};
use markspan_engine::{Span, StyledSpan, StyledText};

pub fn print_ansi(styled: &StyledText) {
    for (segment, attrs) in merged_runs(&styled.text, &styled.spans) {
        let style = content_style(&attrs);
        print!("{}", style.apply(&styled.text[segment.start..segment.end]));
    }
    if !styled.text.ends_with('\n') {
        println!();
    }
}

/// Flattens overlapping spans into contiguous runs with merged attributes.
fn merged_runs(text: &str, spans: &[StyledSpan]) -> Vec<(Span, AttrSet)> {
    let mut bounds = vec![0, text.len()];
    for span in spans {
        bounds.push(span.span.start);
        bounds.push(span.span.end);
    }
    bounds.sort_unstable();
    bounds.dedup();

    let mut runs = Vec::new();
    for pair in bounds.windows(2) {
        let segment = Span::new(pair[0], pair[1]);
        if segment.is_empty() {
            continue;
        }
        let mut attrs = AttrSet::new();
        for span in spans {
            if span.span.start <= segment.start && segment.end <= span.span.end {
                attrs.merge(&span.attrs);
            }
        }
        runs.push((segment, attrs));
    }
    runs
}

fn content_style(attrs: &AttrSet) -> ContentStyle {
    let mut style = ContentStyle::new();
    for attr in attrs.iter() {
        match attr {
            Attr::Weight(Weight::Bold) => style.attributes.set(Attribute::Bold),
            Attr::Weight(Weight::Regular) => {}
            Attr::Oblique(amount) if amount != 0.0 => style.attributes.set(Attribute::Italic),
            Attr::Oblique(_) => {}
            Attr::Underline(true) => style.attributes.set(Attribute::Underlined),
            Attr::Underline(false) => {}
            Attr::Strikethrough(true) => style.attributes.set(Attribute::CrossedOut),
            Attr::Strikethrough(false) => {}
            // The terminal is monospaced already.
            Attr::Monospace(_) => {}
            // No font sizes in a terminal; render headers bold instead.
            Attr::Scale(TextScale::Body) => {}
            Attr::Scale(_) => style.attributes.set(Attribute::Bold),
            Attr::Size(_) => {}
            Attr::Foreground(tint) => style.foreground_color = Some(color(tint)),
            Attr::Background(tint) => style.background_color = Some(color(tint)),
            // Inset bars need real layout; skipped here.
            Attr::Inset(_) => {}
        }
    }
    style
}

fn color(tint: Tint) -> Color {
    match tint {
        Tint::Label => Color::Reset,
        Tint::Gray => Color::DarkGrey,
        Tint::GrayLight => Color::Grey,
        Tint::Red => Color::Red,
        Tint::Surface => Color::AnsiValue(236),
    }
}
