//! Link and URL guarding.
//!
//! Math heuristics must never rewrite characters inside a hyperlink target:
//! `https://en.wikipedia.org/wiki/E=mc%C2%B2` contains an `=` that the
//! implicit converter would happily wrap in dollars. Two layers of defence:
//!
//! 1. A whole-segment short-circuit — pasted text that *is* a URL, a Markdown
//!    link/image, or the common "URL followed by its own bracketed link"
//!    paste artifact is returned untouched before any other stage runs.
//! 2. Embedded URL spans are carved out of the prose and passed through
//!    verbatim; only the interstitial text reaches the math stages.

use once_cell::sync::Lazy;
use regex::Regex;

/// One span of a link-guarded prose chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkSpan {
    /// An absolute URL, preserved byte-for-byte.
    Url(String),
    /// Ordinary text, forwarded to the math stages.
    Text(String),
}

// Absolute URL: scheme://… up to whitespace or a closing parenthesis.
static RE_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z][A-Za-z0-9+.-]*://[^\s)]+").unwrap());

static RE_WHOLE_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.-]*://\S+$").unwrap());

static RE_WHOLE_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^!?\[[^\]]*\]\([^)]*\)$").unwrap());

// Paste artifact: a bare URL immediately followed by a bracketed link,
// e.g. `https://x.test/a [source](https://x.test/a)`.
static RE_URL_THEN_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.-]*://[^\s\[]+\s*!?\[[^\]]*\]\([^)]*\)$").unwrap()
});

/// Whole-segment short-circuit: is the trimmed segment entirely a link blob?
pub fn is_guarded_blob(segment: &str) -> bool {
    let t = segment.trim();
    if t.is_empty() {
        return false;
    }
    RE_WHOLE_URL.is_match(t) || RE_WHOLE_LINK.is_match(t) || RE_URL_THEN_LINK.is_match(t)
}

/// Carve embedded URL spans out of `segment`, left to right.
pub fn split_urls(segment: &str) -> Vec<LinkSpan> {
    let mut spans = Vec::new();
    let mut last = 0;
    for m in RE_URL.find_iter(segment) {
        if m.start() > last {
            spans.push(LinkSpan::Text(segment[last..m.start()].to_string()));
        }
        spans.push(LinkSpan::Url(m.as_str().to_string()));
        last = m.end();
    }
    if last < segment.len() {
        spans.push(LinkSpan::Text(segment[last..].to_string()));
    }
    spans
}
