//! Whitespace normalisation around display-math blocks.
//!
//! The delimiter normalizer and environment wrapper pad their output with
//! newlines to guarantee `$$` lands on its own line; when the surrounding
//! prose already supplied one, that leaves a stray blank line hugging the
//! block. This final pass removes exactly one blank line before an opening
//! delimiter and after a closing one. Blank lines *inside* math bodies are
//! content and are never touched.

fn is_delimiter_line(content: &str) -> bool {
    content.trim() == "$$"
}

fn is_blank(content: &str) -> bool {
    content.trim().is_empty()
}

/// Trim single blank lines adjacent to `$$` delimiter lines.
pub fn normalize(text: &str) -> String {
    let lines: Vec<&str> = text.split_inclusive('\n').collect();
    let contents: Vec<&str> = lines
        .iter()
        .map(|l| l.strip_suffix('\n').unwrap_or(l))
        .collect();

    let mut kept: Vec<&str> = Vec::with_capacity(lines.len());
    let mut kept_contents: Vec<&str> = Vec::with_capacity(lines.len());
    let mut inside = false;
    let mut skip_one_blank = false;

    for i in 0..lines.len() {
        let content = contents[i];

        if is_delimiter_line(content) {
            if !inside {
                // Opening fence: drop the single blank line right before it.
                if kept_contents.last().is_some_and(|c| is_blank(c)) {
                    kept.pop();
                    kept_contents.pop();
                }
            }
            kept.push(lines[i]);
            kept_contents.push(content);
            skip_one_blank = inside;
            inside = !inside;
            continue;
        }

        if skip_one_blank && is_blank(content) {
            // Closing fence was just emitted: drop this single blank line.
            skip_one_blank = false;
            continue;
        }
        skip_one_blank = false;
        kept.push(lines[i]);
        kept_contents.push(content);
    }

    kept.concat()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_before_opening_is_removed() {
        assert_eq!(normalize("text\n\n$$\nx\n$$\n"), "text\n$$\nx\n$$\n");
    }

    #[test]
    fn blank_after_closing_is_removed() {
        assert_eq!(normalize("$$\nx\n$$\n\ntext\n"), "$$\nx\n$$\ntext\n");
    }

    #[test]
    fn only_one_blank_is_collapsed() {
        assert_eq!(
            normalize("text\n\n\n$$\nx\n$$\n"),
            "text\n\n$$\nx\n$$\n"
        );
    }

    #[test]
    fn blanks_inside_math_body_are_kept() {
        let input = "$$\na\n\nb\n$$\n";
        assert_eq!(normalize(input), input);
    }

    #[test]
    fn leading_blank_line_before_block_at_document_start() {
        assert_eq!(normalize("\n$$\nE=mc^2\n$$\n"), "$$\nE=mc^2\n$$\n");
    }

    #[test]
    fn text_without_blocks_is_untouched() {
        let input = "a\n\n\nb\n";
        assert_eq!(normalize(input), input);
    }

    #[test]
    fn adjacent_blocks_are_handled() {
        let input = "$$\na\n$$\n\n$$\nb\n$$\n";
        assert_eq!(normalize(input), "$$\na\n$$\n$$\nb\n$$\n");
    }
}
