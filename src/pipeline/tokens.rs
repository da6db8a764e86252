//! Bare token wrapping: isolated LaTeX fragments get inline dollars.
//!
//! Sources that strip delimiters leave fragments like `90^\circ`,
//! `\sqrt{2}`, `\frac{1}{2}`, or `x_1` sitting in plain prose. Each
//! substitution is context-free, applied once, and guarded against text that
//! is already delimited — the regex crate has no lookaround, so the guard
//! inspects the haystack at the match boundaries inside the replacement
//! closure instead.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static RE_DELIMITER_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*\$\$[ \t]*$").unwrap());

static RE_DEGREES: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)\^\\circ").unwrap());

static RE_SQRT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\sqrt\{[^{}]*\}").unwrap());

static RE_FRAC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\frac\{[^{}]*\}\{[^{}]*\}").unwrap());

static RE_SCRIPT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b([A-Za-z])([_^])([A-Za-z0-9]+)").unwrap());

fn boundary_char_before(haystack: &str, start: usize) -> Option<char> {
    haystack[..start].chars().next_back()
}

fn boundary_char_after(haystack: &str, end: usize) -> Option<char> {
    haystack[end..].chars().next()
}

// Already inside `$…$`? Checked on the immediate boundary only.
fn adjacent_to_dollar(haystack: &str, caps: &Captures<'_>) -> bool {
    let m = caps.get(0).expect("capture 0 always present");
    boundary_char_before(haystack, m.start()) == Some('$')
        || boundary_char_after(haystack, m.end()) == Some('$')
}

fn wrap_whole(haystack: &str, caps: &Captures<'_>) -> String {
    let m = caps.get(0).expect("capture 0 always present");
    if adjacent_to_dollar(haystack, caps) {
        m.as_str().to_string()
    } else {
        format!("${}$", m.as_str())
    }
}

/// Wrap isolated LaTeX-like tokens in inline math delimiters.
///
/// Regions containing a delimiter-only line are left entirely alone — those
/// are display-math neighbourhoods where token-level rewrites do more harm
/// than good.
pub fn wrap(text: &str) -> String {
    if RE_DELIMITER_LINE.is_match(text) {
        return text.to_string();
    }

    let s = RE_SQRT
        .replace_all(text, |caps: &Captures<'_>| wrap_whole(text, caps))
        .into_owned();
    let s = {
        let hay = s.as_str();
        RE_FRAC
            .replace_all(hay, |caps: &Captures<'_>| wrap_whole(hay, caps))
            .into_owned()
    };
    let s = {
        let hay = s.as_str();
        RE_DEGREES
            .replace_all(hay, |caps: &Captures<'_>| {
                if adjacent_to_dollar(hay, caps) {
                    caps[0].to_string()
                } else {
                    format!("${}^{{\\circ}}$", &caps[1])
                }
            })
            .into_owned()
    };
    let hay = s.as_str();
    RE_SCRIPT
        .replace_all(hay, |caps: &Captures<'_>| {
            let m = caps.get(0).expect("capture 0 always present");
            let prev = boundary_char_before(hay, m.start());
            let next = boundary_char_after(hay, m.end());
            // Keep out of existing math, macro arguments, and command names.
            let blocked_before = matches!(prev, Some('$' | '\\' | '{' | '_' | '^'));
            let blocked_after = matches!(next, Some('$' | '}'));
            let delimiter_ish = match next {
                None => true,
                Some(c) => c.is_whitespace() || ".,;:)]!?\"'".contains(c),
            };
            if blocked_before || blocked_after || !delimiter_ish {
                m.as_str().to_string()
            } else {
                format!("${}{}{}$", &caps[1], &caps[2], &caps[3])
            }
        })
        .into_owned()
}
