//! The final escape pass.
//!
//! After every rule has run, each remaining live backslash is claimed as a
//! length-1 specifier so it is removed (or restyled) exactly like a
//! delimiter token. A backslash preceded by an odd number of backslashes is
//! itself escaped content and stays; backslashes inside claimed regions
//! (raw content in particular) are left alone by the collision check.

use super::exclusions::{Exclusions, Reason};
use super::scan::find_unclaimed;

pub(crate) fn claim_escapes(text: &str, exclusions: &mut Exclusions) {
    let mut pos = 0;
    while let Some(found) = find_unclaimed(text, "\\", exclusions, &mut pos, text.len(), false) {
        exclusions.claim(found, Reason::Specifier);
    }
}
