//! Bare-line promotion: isolated math-heavy lines become display blocks.
//!
//! A line like `a^2 + b^2 = c^2` sitting alone in prose almost certainly
//! wants to be display math. The per-line classifier is deliberately strict —
//! six conditions must all hold — because a false positive here wraps a
//! sentence of prose in `$$`, which is far worse than leaving a formula
//! unwrapped. The thresholds are tunables, not load-bearing constants.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static RE_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#{1,6} ").unwrap());
static RE_BULLET: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-*•] ").unwrap());
static RE_COMMAND: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\[A-Za-z]+").unwrap());
static RE_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z]{2,}").unwrap());

fn is_delimiter_line(content: &str) -> bool {
    content.trim() == "$$"
}

fn is_horizontal_rule(trimmed: &str) -> bool {
    let marks: Vec<char> = trimmed.chars().filter(|c| !c.is_whitespace()).collect();
    marks.len() >= 3
        && matches!(marks[0], '*' | '-' | '_')
        && marks.iter().all(|&c| c == marks[0])
}

/// The per-line "mathy" classifier (rules a–f).
fn is_mathy_line(content: &str) -> bool {
    // a. never touch a line that already carries dollar delimiters
    if content.contains('$') {
        return false;
    }
    let trimmed = content.trim();
    // b. non-empty
    if trimmed.is_empty() {
        return false;
    }
    // c. structural Markdown lines are prose by definition
    if RE_HEADING.is_match(trimmed) || RE_BULLET.is_match(trimmed) || is_horizontal_rule(trimmed)
    {
        return false;
    }
    // d. delimiter lines handled by the caller, but keep the rule local too
    if is_delimiter_line(content) {
        return false;
    }
    // e. at least one math token
    let has_token = trimmed.contains(['=', '^', '_', '+', '-', '*', '/'])
        || RE_COMMAND.is_match(trimmed);
    if !has_token {
        return false;
    }
    // f. at most 4 distinct words of length ≥ 2 (caps wordy-prose false positives)
    let words: HashSet<String> = RE_WORD
        .find_iter(trimmed)
        .map(|m| m.as_str().to_lowercase())
        .collect();
    words.len() <= 4
}

/// Promote each isolated mathy line to its own display block.
///
/// Lines inside `$$` blocks (including blocks created by earlier stages in
/// the same call) and lines directly adjacent to a delimiter line are left
/// alone — the latter avoids stacking delimiters onto an existing block.
pub fn promote(text: &str) -> String {
    let lines: Vec<&str> = text.split_inclusive('\n').collect();
    let contents: Vec<&str> = lines
        .iter()
        .map(|l| l.strip_suffix('\n').unwrap_or(l))
        .collect();

    let mut out = String::with_capacity(text.len() + 16);
    let mut inside = false;

    for i in 0..lines.len() {
        let content = contents[i];
        if is_delimiter_line(content) {
            inside = !inside;
            out.push_str(lines[i]);
            continue;
        }
        if inside {
            out.push_str(lines[i]);
            continue;
        }
        let above_delim = i > 0 && is_delimiter_line(contents[i - 1]);
        let below_delim = i + 1 < contents.len() && is_delimiter_line(contents[i + 1]);
        if is_mathy_line(content) && !above_delim && !below_delim {
            out.push_str("$$\n");
            out.push_str(content.trim_end());
            out.push_str("\n$$");
            if lines[i].ends_with('\n') {
                out.push('\n');
            }
        } else {
            out.push_str(lines[i]);
        }
    }

    out
}
