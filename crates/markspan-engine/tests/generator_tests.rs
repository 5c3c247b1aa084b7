use std::collections::HashSet;

use markspan_engine::{
    Attr, AttrKey, Generator, Span, StyledText, TextScale, Tint, Weight,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

/// Plain-text output of the standard preset in Delete mode, covering rule
/// precedence, escaping, raw content, unterminated delimiters, block rules
/// and line-crossing control.
#[rstest]
#[case::rule_order_precedence(
    "This is **bold**, *italic* and *crossed **like this* Hehe**",
    "This is bold, italic and crossed like this Hehe"
)]
#[case::escape_backslashes_stripped(r"This is \*escaped\*", "This is *escaped*")]
#[case::raw_content_keeps_backslash(r"This is `raw\`", r"This is raw\")]
#[case::unterminated_delimiter_left_alone("This is `invalid", "This is `invalid")]
#[case::unknown_tokens_pass_through(
    "Hello this <<does nothing>> ok?",
    "Hello this <<does nothing>> ok?"
)]
#[case::block_quote_stops_at_line_break("> This is a quote\nThis isn't", "This is a quote\nThis isn't")]
#[case::code_does_not_cross_lines("`This will not\nbe parsed`", "`This will not\nbe parsed`")]
#[case::double_ticks_do_not_cross_lines(
    "This will not``\n``be parsed",
    "This will not``\n``be parsed"
)]
#[case::fenced_code_crosses_lines("```This will \nbe parsed```", "This will \nbe parsed")]
fn standard_plain_text(#[case] input: &str, #[case] expected: &str) {
    let generator = Generator::standard();
    assert_eq!(generator.generate(input, None).text, expected);
}

#[test]
fn delete_mode_renumbers_spans() {
    let generator = Generator::standard();
    let out = generator.generate("a **b** c", None);
    assert_eq!(out.text, "a b c");
    assert_eq!(out.spans.len(), 1);
    assert_eq!(out.spans[0].span, Span::new(2, 3));
    assert_eq!(
        out.spans[0].attrs.get(AttrKey::Weight),
        Some(Attr::Weight(Weight::Bold))
    );
    assert_eq!(&out.text[2..3], "b");
}

#[test]
fn raw_content_is_not_rematched() {
    let generator = Generator::standard();
    let out = generator.generate("`**x**`", None);
    // The asterisks sit inside raw code content; the bold rule never
    // touches them.
    assert_eq!(out.text, "**x**");
    assert_eq!(out.spans.len(), 1);
    assert_eq!(
        out.spans[0].attrs.get(AttrKey::Monospace),
        Some(Attr::Monospace(true))
    );
}

#[test]
fn keep_mode_preserves_text_and_overlays_specifiers() {
    let generator = Generator::standard().keeping_specifiers();
    let input = "**b**";
    let out = generator.generate(input, None);
    assert_eq!(out.text, input);
    // Content span first, then one overlay per delimiter, in ascending
    // order, so overlay attributes win any merge.
    assert_eq!(out.spans.len(), 3);
    assert_eq!(out.spans[0].span, Span::new(2, 3));
    assert_eq!(out.spans[1].span, Span::new(0, 2));
    assert_eq!(out.spans[2].span, Span::new(3, 5));
    assert_eq!(
        out.spans[1].attrs.get(AttrKey::Weight),
        Some(Attr::Weight(Weight::Regular))
    );
    assert_eq!(out.spans[1].tap_id, None);
}

#[test]
fn keep_mode_output_length_equals_input_length() {
    let generator = Generator::standard().keeping_specifiers();
    let input = "# Title\n> quote\n**bold** and \\*escaped\\* and `code`";
    assert_eq!(generator.generate(input, None).text.len(), input.len());
}

#[test]
fn delete_resolution_is_idempotent() {
    let generator = Generator::standard();
    let once = generator.generate("**bold** and `code`", None);
    // Resolution stripped every delimiter, so a second run finds nothing.
    let twice = generator.generate(&once.text, None);
    assert_eq!(once.text, twice.text);
    assert!(twice.spans.is_empty());
}

#[test]
fn header_styles_rest_of_line_only() {
    let generator = Generator::standard();
    let out = generator.generate("# Title\nbody", None);
    assert_eq!(out.text, "Title\nbody");
    assert_eq!(out.spans.len(), 1);
    assert_eq!(out.spans[0].span, Span::new(0, 5));
    assert_eq!(
        out.spans[0].attrs.get(AttrKey::Scale),
        Some(Attr::Scale(TextScale::Title1))
    );
}

#[test]
fn second_level_header_is_not_eaten_by_first() {
    let generator = Generator::standard();
    let out = generator.generate("## Sub", None);
    assert_eq!(out.text, "Sub");
    assert_eq!(
        out.spans[0].attrs.get(AttrKey::Scale),
        Some(Attr::Scale(TextScale::Title2))
    );
}

#[test]
fn document_quote_covers_everything_after_marker() {
    let generator = Generator::standard();
    let out = generator.generate(">>> rest\nof doc", None);
    assert_eq!(out.text, "rest\nof doc");
    assert_eq!(out.spans.len(), 1);
    assert_eq!(out.spans[0].span, Span::new(0, out.text.len()));
}

#[test]
fn mid_line_quote_marker_is_literal() {
    let generator = Generator::standard();
    let out = generator.generate("a > b", None);
    assert_eq!(out.text, "a > b");
    assert!(out.spans.is_empty());
}

fn spoiler_spans(out: &StyledText) -> Vec<(Option<u32>, Option<Attr>)> {
    out.spans
        .iter()
        .filter(|s| s.tap_id.is_some())
        .map(|s| (s.tap_id, s.attrs.get(AttrKey::Foreground)))
        .collect()
}

#[test]
fn tap_ids_run_in_acceptance_order() {
    let generator = Generator::discord();
    let out = generator.generate("||a|| and ||b||", None);
    let ids: Vec<_> = spoiler_spans(&out).iter().map(|(id, _)| *id).collect();
    assert_eq!(ids, vec![Some(0), Some(1)]);
}

#[test]
fn unaccepted_candidates_get_no_tap_id() {
    let generator = Generator::discord();
    let out = generator.generate("||a|| ||unclosed", None);
    let ids: Vec<_> = spoiler_spans(&out).iter().map(|(id, _)| *id).collect();
    assert_eq!(ids, vec![Some(0)]);
}

#[test]
fn no_reveal_set_means_everything_revealed() {
    let generator = Generator::discord();
    let out = generator.generate("||secret||", None);
    assert_eq!(
        spoiler_spans(&out),
        vec![(Some(0), Some(Attr::Foreground(Tint::Label)))]
    );
}

#[test]
fn empty_reveal_set_hides_all_spoilers() {
    let generator = Generator::discord();
    let revealed = HashSet::new();
    let out = generator.generate("||secret||", Some(&revealed));
    // Hidden: foreground matches the cover background.
    assert_eq!(
        spoiler_spans(&out),
        vec![(Some(0), Some(Attr::Foreground(Tint::Gray)))]
    );
}

#[test]
fn only_listed_ids_are_revealed() {
    let generator = Generator::discord();
    let revealed = HashSet::from([1]);
    let out = generator.generate("||a|| ||b||", Some(&revealed));
    assert_eq!(
        spoiler_spans(&out),
        vec![
            (Some(0), Some(Attr::Foreground(Tint::Gray))),
            (Some(1), Some(Attr::Foreground(Tint::Label))),
        ]
    );
}

#[test]
fn adversarial_marker_run_completes() {
    // Thousands of toggled markers must not blow the stack or claim
    // overlapping ranges.
    let generator = Generator::standard();
    let mut input = String::new();
    for _ in 0..5000 {
        input.push_str("**x** ");
    }
    let out = generator.generate(&input, None);
    assert_eq!(out.spans.len(), 5000);
    assert_eq!(out.text.len(), input.len() - 5000 * 4);
}

#[test]
fn empty_input_yields_empty_output() {
    let generator = Generator::standard();
    let out = generator.generate("", None);
    assert_eq!(out.text, "");
    assert!(out.spans.is_empty());
}

#[test]
fn multibyte_text_around_delimiters() {
    let generator = Generator::standard();
    let out = generator.generate("héllo **wörld** ✓", None);
    assert_eq!(out.text, "héllo wörld ✓");
    let span = out.spans[0].span;
    assert_eq!(&out.text[span.start..span.end], "wörld");
}
