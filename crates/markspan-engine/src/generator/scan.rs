//! Scanning primitives shared by the rule matcher and the escape pass.
//!
//! Everything here is an explicit loop with a cursor: adversarial input with
//! thousands of delimiter pairs must not grow the stack.

use super::exclusions::Exclusions;
use super::span::Span;

const ESCAPE: u8 = b'\\';

/// Finds the next occurrence of `token` in `text[*pos..until)` that is
/// neither escaped (unless `raw`) nor colliding with a claimed range.
///
/// The cursor is advanced past every candidate inspected, including rejected
/// ones, so a caller never retries the same position. Returns the token's
/// span on success; on failure the cursor rests after the last candidate.
pub(crate) fn find_unclaimed(
    text: &str,
    token: &str,
    exclusions: &Exclusions,
    pos: &mut usize,
    until: usize,
    raw: bool,
) -> Option<Span> {
    while *pos < until {
        let rel = text[*pos..until].find(token)?;
        let start = *pos + rel;
        let found = Span::new(start, start + token.len());
        *pos = found.end;
        if (raw || !is_escaped(text, start)) && !exclusions.collides(found) {
            return Some(found);
        }
    }
    None
}

/// Is the character at byte offset `at` escaped?
///
/// Counts the consecutive backslashes immediately before `at`: an odd count
/// means the character is escaped, an even count (including zero) means the
/// backslashes pair off among themselves.
pub(crate) fn is_escaped(text: &str, at: usize) -> bool {
    let bytes = text.as_bytes();
    let mut backslashes = 0;
    let mut i = at;
    while i > 0 && bytes[i - 1] == ESCAPE {
        backslashes += 1;
        i -= 1;
    }
    backslashes % 2 == 1
}

/// Byte offset of the next line break at or after `from`, or the text length
/// if the last line is unterminated.
pub(crate) fn line_end(text: &str, from: usize) -> usize {
    match text[from..].find('\n') {
        Some(rel) => from + rel,
        None => text.len(),
    }
}

/// True at offset 0 and immediately after a line break.
pub(crate) fn at_line_start(text: &str, at: usize) -> bool {
    at == 0 || text.as_bytes()[at - 1] == b'\n'
}
