//! Environment wrapping: bare matrix/align-style environments get display
//! delimiters.
//!
//! `\begin{bmatrix} … \end{bmatrix}` pasted outside any math block renders as
//! plain text; wrapping it in `$$` fixes that. Only a fixed set of
//! environment names is recognised, and the closing marker must carry the
//! *same* name — the regex crate has no backreferences, so the `\end` token
//! is located by string search instead.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_BEGIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\\begin\{(bmatrix|pmatrix|vmatrix|Vmatrix|matrix|smallmatrix|cases|array|align|aligned)\}",
    )
    .unwrap()
});

// Odd count of `$$` in the already-emitted prefix means the cursor sits
// inside an open display block.
fn inside_display(prefix: &str) -> bool {
    prefix.matches("$$").count() % 2 == 1
}

/// Wrap recognised environments that are not already inside display math.
pub fn wrap(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 32);
    let mut pos = 0;

    while let Some(caps) = RE_BEGIN.captures(&text[pos..]) {
        let m = caps.get(0).expect("capture 0 always present");
        let begin_start = pos + m.start();
        let begin_end = pos + m.end();
        let name = &caps[1];

        out.push_str(&text[pos..begin_start]);

        let end_marker = format!("\\end{{{name}}}");
        let span_end = match text[begin_end..].find(&end_marker) {
            Some(rel) => begin_end + rel + end_marker.len(),
            None => {
                // Mismatched or missing \end — leave the token and move on.
                out.push_str(m.as_str());
                pos = begin_end;
                continue;
            }
        };
        let span = &text[begin_start..span_end];

        if inside_display(&out) || span.contains("$$") {
            out.push_str(span);
            pos = span_end;
            continue;
        }

        let line_start = out.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let prefix = out[line_start..].to_string();
        if prefix.chars().all(|c| c == ' ' || c == '\t') {
            // Opening line holds only indentation; reuse it for the fences.
            out.push_str("$$\n");
            out.push_str(&prefix);
            out.push_str(span);
            out.push('\n');
            out.push_str(&prefix);
            out.push_str("$$");
        } else {
            out.push_str("\n$$\n");
            out.push_str(span);
            out.push_str("\n$$");
        }
        let rest = &text[span_end..];
        if !rest.is_empty() && !rest.starts_with('\n') {
            out.push('\n');
        }
        pos = span_end;
    }

    out.push_str(&text[pos..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_bmatrix_is_wrapped() {
        let input = r"\begin{bmatrix}1 & 0 \\ 0 & 1\end{bmatrix}";
        let out = wrap(input);
        assert_eq!(out, format!("$$\n{input}\n$$"));
    }

    #[test]
    fn environment_content_is_unchanged_inside() {
        let input = r"\begin{cases}x & x > 0 \\ -x & x \le 0\end{cases}";
        let out = wrap(input);
        assert!(out.contains(input));
    }

    #[test]
    fn already_displayed_environment_is_skipped() {
        let input = "$$\n\\begin{bmatrix}1\\end{bmatrix}\n$$";
        assert_eq!(wrap(input), input);
    }

    #[test]
    fn mismatched_names_are_not_matched() {
        let input = r"\begin{bmatrix}1 & 2\end{pmatrix}";
        assert_eq!(wrap(input), input);
    }

    #[test]
    fn unknown_environment_is_ignored() {
        let input = r"\begin{theorem}text\end{theorem}";
        assert_eq!(wrap(input), input);
    }

    #[test]
    fn indentation_is_preserved_on_fences() {
        let input = "  \\begin{pmatrix}a\\end{pmatrix}\n";
        let out = wrap(input);
        assert_eq!(out, "  $$\n  \\begin{pmatrix}a\\end{pmatrix}\n  $$\n");
    }

    #[test]
    fn mid_line_environment_gets_own_block() {
        let input = r"Identity: \begin{bmatrix}1\end{bmatrix} done";
        let out = wrap(input);
        assert_eq!(
            out,
            "Identity: \n$$\n\\begin{bmatrix}1\\end{bmatrix}\n$$\n done"
        );
    }

    #[test]
    fn nested_environment_is_not_rewrapped() {
        let input = r"\begin{cases}\begin{matrix}a\end{matrix}\end{cases}";
        let out = wrap(input);
        assert_eq!(out.matches("$$").count(), 2);
    }
}
