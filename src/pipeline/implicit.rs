//! Implicit delimiter conversion: balanced `(…)` / `[…]` spans to inline math.
//!
//! The scan keeps a depth counter for one bracket pair at a time; every
//! return to depth zero yields an outermost balanced span, which a
//! pair-specific guard either accepts (rewritten `$inner$`) or rejects
//! (left byte-identical, original brackets included). Spans are classified
//! exactly once per call — a span produced by an earlier acceptance is never
//! re-examined, and anything already carrying `$` is rejected outright so
//! output of the delimiter normalizer cannot be double-wrapped.
//!
//! Unbalanced brackets fail open: an unmatched opener flushes the rest of
//! the text verbatim, an unmatched closer is copied straight through.

use crate::pipeline::classify;
use once_cell::sync::Lazy;
use regex::Regex;

/// Which bracket pair the converter is scanning for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketKind {
    Parens,
    Brackets,
}

impl BracketKind {
    fn chars(self) -> (char, char) {
        match self {
            BracketKind::Parens => ('(', ')'),
            BracketKind::Brackets => ('[', ']'),
        }
    }
}

/// One outermost balanced span, with its bounded context windows.
#[derive(Debug)]
struct ParenSpan<'a> {
    inner: &'a str,
    before: &'a str,
    after: &'a str,
}

const CONTEXT_CHARS: usize = 60;

// Enumeration markers with trailing punctuation: "a)", "ii.", "3):".
static RE_ENUMERATION_PUNCT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:\d+|[a-z]|[ivxlcdm]{1,5})[)\].:,]$").unwrap());

static RE_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").unwrap());

static RE_ROMAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^[ivxlcdm]{2,5}$").unwrap());

static RE_REFERENCE_WORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:note|notes|see|ref|fig|figure|table|section|chapter|appendix)\b")
        .unwrap()
});

fn is_single_letter(s: &str) -> bool {
    let mut chars = s.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_alphabetic())
}

fn accept_parens(span: &ParenSpan<'_>) -> bool {
    let inner = span.inner.trim();
    if inner.is_empty() || inner.contains('$') {
        return false;
    }
    // Enumeration markers: "(3)", "(ii)", "a)" and friends.
    if RE_ENUMERATION_PUNCT.is_match(inner)
        || RE_DIGITS.is_match(inner)
        || RE_ROMAN.is_match(inner)
    {
        return false;
    }
    // Cross-reference asides: "(see section 2)", "(fig. 4)".
    if RE_REFERENCE_WORD.is_match(inner) {
        return false;
    }
    if classify::is_latex_like(inner) {
        return true;
    }
    // A lone letter is math only when its surroundings say so.
    is_single_letter(inner) && classify::is_mathy_context(span.before, span.after)
}

fn accept_brackets(span: &ParenSpan<'_>) -> bool {
    let inner = span.inner.trim();
    if inner.is_empty() || inner.contains('$') {
        return false;
    }
    // `[label](target)` and `![alt](target)` are links, not math.
    if span.after.starts_with('(') || span.before.ends_with('!') {
        return false;
    }
    // Footnote reference `[^label]`.
    if inner.starts_with('^') {
        return false;
    }
    classify::is_latex_like(inner)
}

fn context_before(text: &str, idx: usize) -> &str {
    let prefix = &text[..idx];
    let start = prefix
        .char_indices()
        .rev()
        .nth(CONTEXT_CHARS - 1)
        .map(|(i, _)| i)
        .unwrap_or(0);
    &prefix[start..]
}

fn context_after(text: &str, idx: usize) -> &str {
    let rest = &text[idx..];
    let end = rest
        .char_indices()
        .nth(CONTEXT_CHARS)
        .map(|(i, _)| i)
        .unwrap_or(rest.len());
    &rest[..end]
}

/// Convert accepted balanced spans of the chosen pair to `$…$`.
pub fn convert(text: &str, kind: BracketKind) -> String {
    let (open_ch, close_ch) = kind.chars();
    let mut out = String::with_capacity(text.len());
    let mut depth = 0usize;
    let mut open_idx = 0usize;

    for (i, ch) in text.char_indices() {
        if depth == 0 {
            if ch == open_ch {
                depth = 1;
                open_idx = i;
            } else {
                out.push(ch);
            }
            continue;
        }
        if ch == open_ch {
            depth += 1;
        } else if ch == close_ch {
            depth -= 1;
            if depth == 0 {
                let close_end = i + close_ch.len_utf8();
                let span = ParenSpan {
                    inner: &text[open_idx + open_ch.len_utf8()..i],
                    before: context_before(text, open_idx),
                    after: context_after(text, close_end),
                };
                let accepted = match kind {
                    BracketKind::Parens => accept_parens(&span),
                    BracketKind::Brackets => accept_brackets(&span),
                };
                if accepted {
                    out.push('$');
                    out.push_str(span.inner.trim());
                    out.push('$');
                } else {
                    out.push_str(&text[open_idx..close_end]);
                }
            }
        }
    }

    // Unmatched opener: flush the pending tail untouched.
    if depth > 0 {
        out.push_str(&text[open_idx..]);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parens(s: &str) -> String {
        convert(s, BracketKind::Parens)
    }

    fn brackets(s: &str) -> String {
        convert(s, BracketKind::Brackets)
    }

    #[test]
    fn latex_like_parens_convert() {
        assert_eq!(parens("(a+b)"), "$a+b$");
        assert_eq!(parens("so (x = y) holds"), "so $x = y$ holds");
        assert_eq!(parens(r"(\frac{1}{2})"), r"$\frac{1}{2}$");
    }

    #[test]
    fn enumerations_are_rejected() {
        assert_eq!(parens("(3)"), "(3)");
        assert_eq!(parens("(ii)"), "(ii)");
        assert_eq!(parens("items (a) and (b)"), "items (a) and (b)");
    }

    #[test]
    fn reference_words_are_rejected() {
        assert_eq!(parens("(see section 2)"), "(see section 2)");
        assert_eq!(parens("(fig. 4)"), "(fig. 4)");
        assert_eq!(parens("(note the sign)"), "(note the sign)");
    }

    #[test]
    fn single_letter_in_mathy_context_converts() {
        assert_eq!(
            parens("the matrix (A) is invertible"),
            "the matrix $A$ is invertible"
        );
        assert_eq!(parens("the (n)th term"), "the $n$th term");
    }

    #[test]
    fn single_letter_in_plain_prose_is_rejected() {
        assert_eq!(parens("answer (c) is right"), "answer (c) is right");
    }

    #[test]
    fn outermost_span_converts_once() {
        assert_eq!(parens("(f(x) + g(x))"), "$f(x) + g(x)$");
    }

    #[test]
    fn unbalanced_brackets_fail_open() {
        assert_eq!(parens("open ( only"), "open ( only");
        assert_eq!(parens("only ) close"), "only ) close");
    }

    #[test]
    fn spans_with_dollars_are_rejected() {
        assert_eq!(parens("($x = y$)"), "($x = y$)");
    }

    #[test]
    fn markdown_links_are_rejected() {
        assert_eq!(brackets("[text](http://x)"), "[text](http://x)");
        assert_eq!(brackets("![x=1](img.png)"), "![x=1](img.png)");
    }

    #[test]
    fn footnotes_are_rejected() {
        assert_eq!(brackets("claim[^1]"), "claim[^1]");
    }

    #[test]
    fn latex_like_brackets_convert() {
        assert_eq!(brackets("[x^2 + 1]"), "$x^2 + 1$");
        assert_eq!(brackets("interval [a,b] here"), "interval $a,b$ here");
    }

    #[test]
    fn plain_bracket_text_is_rejected() {
        assert_eq!(brackets("[citation needed]"), "[citation needed]");
    }

    #[test]
    fn context_windows_are_char_safe() {
        // Multibyte text just before the span must not split a char boundary.
        let input = "αβγδε ".repeat(20) + "(x = y)";
        let out = parens(&input);
        assert!(out.ends_with("$x = y$"));
    }
}
