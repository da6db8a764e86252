//! Heuristic classifiers shared by the implicit-delimiter converter.
//!
//! "LaTeX-like" is a bag of weak signals, any one of which is enough: a
//! backslash command, relational/structural characters, Unicode math symbols,
//! named function tokens, sub/superscript adjacency, function-call shapes.
//! These are tuned on example inputs, not derived from a grammar — treat the
//! vocabularies and thresholds as reviewable tunables.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_COMMAND: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\[A-Za-z]+").unwrap());

// An arithmetic operator touching an alphanumeric: `a+b`, `2*x`, `n-1`.
static RE_ARITH_ADJACENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9A-Za-z][+*/-]|[+*/-][0-9A-Za-z]").unwrap());

static RE_FUNCTION_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(sin|cos|tan|sec|csc|cot|sinh|cosh|tanh|log|ln|exp|det|trace|ker|rank|dim|min|max|sup|inf|lim|arg|gcd|mod)\b",
    )
    .unwrap()
});

// Two-element list shape: `a,b` or `0, 1` (the `[a,b]` interval case).
static RE_TWO_ELEMENT_LIST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9\\]+\s*,\s*[A-Za-z0-9\\]+$").unwrap());

// Function call: single letter applied to arguments, `f(x)`, `u(x,t)`.
static RE_FUNCTION_CALL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[A-Za-z]\([A-Za-z0-9]").unwrap());

static RE_MATH_NOUN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(matrix|matrices|vector|eigen\w*|polynomial|gradient|derivative|integral|equation|coefficient|determinant|tensor|scalar|basis|norm|subspace|operator)\b",
    )
    .unwrap()
});

const UNICODE_MATH: &[char] = &[
    '≤', '≥', '≠', '≈', '≡', '∼', '∝', '→', '←', '↔', '⇒', '⇐', '⇔', '↦', '∑', '∏', '∫', '√',
    '∂', '∇', '∈', '∉', '⊂', '⊃', '⊆', '⊇', '∪', '∩', '∀', '∃', '∅', '∞', '±', '×', '÷', '⋅',
    '∘', '⊕', '⊗', 'ℝ', 'ℤ', 'ℕ', 'ℚ', 'ℂ',
];

const BRACKET_MATH: &[char] = &['⟨', '⟩', '‖', '⌊', '⌋', '⌈', '⌉', '⟦', '⟧'];

// Words that, immediately after a closing bracket, mark the bracketed letter
// as an index or ordinal: "(i)th", "(n) degree", "(k) component".
const ORDINAL_WORDS: &[&str] = &[
    "th", "degree", "degrees", "dim", "term", "mode", "harmonic", "component",
];

/// Does `inner` look like LaTeX / math content?
pub fn is_latex_like(inner: &str) -> bool {
    if inner.is_empty() {
        return false;
    }
    RE_COMMAND.is_match(inner)
        || inner.contains(['=', '_', '^'])
        || RE_ARITH_ADJACENT.is_match(inner)
        || inner.contains(BRACKET_MATH)
        || inner.contains(UNICODE_MATH)
        || RE_FUNCTION_NAME.is_match(inner)
        || RE_TWO_ELEMENT_LIST.is_match(inner)
        || RE_FUNCTION_CALL.is_match(inner)
}

/// Does the context window around a span read as mathematical?
pub fn is_mathy_context(before: &str, after: &str) -> bool {
    for window in [before, after] {
        if window.contains(['\\', '=', '_', '^'])
            || window.contains(UNICODE_MATH)
            || RE_MATH_NOUN.is_match(window)
        {
            return true;
        }
    }
    follows_ordinal_word(after)
}

/// Is the text immediately after the span an ordinal/positional word?
pub fn follows_ordinal_word(after: &str) -> bool {
    let rest = after.trim_start_matches([' ', '\t', '-']);
    let word: String = rest
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect::<String>()
        .to_lowercase();
    ORDINAL_WORDS.contains(&word.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backslash_commands_are_latex_like() {
        assert!(is_latex_like(r"\frac{1}{2}"));
        assert!(is_latex_like(r"\alpha"));
        assert!(is_latex_like(r"\begin{bmatrix}1\end{bmatrix}"));
    }

    #[test]
    fn relations_and_scripts_are_latex_like() {
        assert!(is_latex_like("a = b"));
        assert!(is_latex_like("x_1"));
        assert!(is_latex_like("y^2"));
        assert!(is_latex_like("n ≤ m"));
    }

    #[test]
    fn arithmetic_adjacent_to_alphanumerics() {
        assert!(is_latex_like("a+b"));
        assert!(is_latex_like("2*n"));
        assert!(!is_latex_like("well - spaced - dashes"));
    }

    #[test]
    fn function_shapes_are_latex_like() {
        assert!(is_latex_like("sin x"));
        assert!(is_latex_like("f(x)"));
        assert!(is_latex_like("u(x,t)"));
        assert!(is_latex_like("a,b"));
    }

    #[test]
    fn prose_is_not_latex_like() {
        assert!(!is_latex_like("see below"));
        assert!(!is_latex_like("for example"));
        assert!(!is_latex_like(""));
    }

    #[test]
    fn mathy_context_signals() {
        assert!(is_mathy_context("the matrix ", " is invertible"));
        assert!(is_mathy_context("where x = 1 and ", ""));
        assert!(is_mathy_context("", "th term of the series"));
        assert!(!is_mathy_context("as noted in chapter ", " above"));
    }

    #[test]
    fn ordinal_words_after_span() {
        assert!(follows_ordinal_word("th term"));
        assert!(follows_ordinal_word("-th entry"));
        assert!(follows_ordinal_word(" degree polynomial"));
        assert!(!follows_ordinal_word(" is large"));
    }
}
