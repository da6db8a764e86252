//! Delimiter normalisation: escaped LaTeX delimiters to dollar form.
//!
//! Three unconditional rules, applied in one forward pass before any of the
//! optional stages so that everything downstream sees canonical delimiters:
//!
//! 1. `\( X \)` → `$X$` (inline, inner text trimmed)
//! 2. `\[ X \]` → a display block: `$$` and the trimmed body on separate lines
//! 3. a bare `[` line / body / `]` line triple — the alternate display-math
//!    spelling some sources emit — rewritten exactly like rule 2

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static RE_INLINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\\\((.*?)\\\)").unwrap());

static RE_DISPLAY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\\\[(.*?)\\\]").unwrap());

// `[` alone on its own line, anything, `]` alone on its own line.
static RE_BRACKET_LINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?ms)^[ \t]*\[[ \t]*\n(.*?)\n[ \t]*\][ \t]*$").unwrap());

/// Rewrite escaped parenthesis/bracket delimiters into dollar form.
pub fn normalize(text: &str) -> String {
    let s = RE_DISPLAY.replace_all(text, |caps: &Captures<'_>| {
        format!("\n$$\n{}\n$$\n", caps[1].trim())
    });
    let s = RE_INLINE.replace_all(&s, |caps: &Captures<'_>| format!("${}$", caps[1].trim()));
    RE_BRACKET_LINES
        .replace_all(&s, |caps: &Captures<'_>| {
            format!("$$\n{}\n$$", caps[1].trim())
        })
        .into_owned()
}
