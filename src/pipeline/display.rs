//! Display-math segmentation.
//!
//! A line-oriented state machine classifies prose into `Inside` (display-math
//! bodies and their `$$` delimiter lines, plus same-line `$$…$$` pairs) and
//! `Outside` regions. Later stages receive only Outside text, which makes the
//! "never rewrite existing math" invariant structural rather than something
//! each rewrite rule has to re-check.
//!
//! A `$$` that opens but never closes does not swallow the rest of the
//! document: the state machine only enters a block when a closing delimiter
//! line exists further down.

use once_cell::sync::Lazy;
use regex::Regex;

/// A region of prose, as seen by the math-rewrite stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Region {
    /// Display-math text (delimiter lines included): a fixed point of every
    /// later stage.
    Inside(String),
    /// Editable prose.
    Outside(String),
}

// Same-line paired display math, e.g. `inline $$x^2$$ math`.
static RE_INLINE_PAIR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$\$.*?\$\$").unwrap());

fn is_delimiter_line(line: &str) -> bool {
    line.trim() == "$$"
}

fn strip_terminator(line: &str) -> &str {
    line.strip_suffix('\n').unwrap_or(line)
}

/// Split `text` into an ordered sequence of Inside/Outside regions.
///
/// Concatenating the regions' text in order reproduces `text` exactly.
pub fn split_regions(text: &str) -> Vec<Region> {
    let lines: Vec<&str> = text.split_inclusive('\n').collect();
    let mut regions = Vec::new();
    let mut outside = String::new();
    let mut body = String::new();
    let mut inside = false;

    let flush_outside = |buf: &mut String, regions: &mut Vec<Region>| {
        if !buf.is_empty() {
            regions.push(Region::Outside(std::mem::take(buf)));
        }
    };
    let flush_body = |buf: &mut String, regions: &mut Vec<Region>| {
        if !buf.is_empty() {
            regions.push(Region::Inside(std::mem::take(buf)));
        }
    };

    for (i, line) in lines.iter().enumerate() {
        let content = strip_terminator(line);

        if is_delimiter_line(content) {
            flush_outside(&mut outside, &mut regions);
            flush_body(&mut body, &mut regions);
            // The delimiter line is its own Inside region, immune to rewriting.
            regions.push(Region::Inside((*line).to_string()));
            if inside {
                inside = false;
            } else {
                // Fail open: only enter the block if it actually closes.
                let closes = lines[i + 1..]
                    .iter()
                    .any(|l| is_delimiter_line(strip_terminator(l)));
                inside = closes;
            }
            continue;
        }

        if inside {
            body.push_str(line);
            continue;
        }

        // Outside a block: carve out same-line $$…$$ pairs. They do not
        // affect the line-oriented state.
        let mut last = 0;
        for m in RE_INLINE_PAIR.find_iter(line) {
            outside.push_str(&line[last..m.start()]);
            flush_outside(&mut outside, &mut regions);
            regions.push(Region::Inside(m.as_str().to_string()));
            last = m.end();
        }
        outside.push_str(&line[last..]);
    }

    flush_outside(&mut outside, &mut regions);
    flush_body(&mut body, &mut regions);
    regions
}

/// Rewrite only the Outside regions of `text` with `f`, re-splicing Inside
/// regions at their original positions.
pub fn map_outside<F>(text: &str, mut f: F) -> String
where
    F: FnMut(&str) -> String,
{
    let mut out = String::with_capacity(text.len());
    for region in split_regions(text) {
        match region {
            Region::Inside(t) => out.push_str(&t),
            Region::Outside(t) => out.push_str(&f(&t)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejoin(regions: &[Region]) -> String {
        regions
            .iter()
            .map(|r| match r {
                Region::Inside(t) | Region::Outside(t) => t.as_str(),
            })
            .collect()
    }

    #[test]
    fn block_body_is_inside() {
        let text = "before\n$$\nE = mc^2\n$$\nafter\n";
        let regions = split_regions(text);
        assert_eq!(rejoin(&regions), text);
        assert!(regions.contains(&Region::Inside("E = mc^2\n".into())));
        assert!(regions.contains(&Region::Outside("before\n".into())));
        assert!(regions.contains(&Region::Outside("after\n".into())));
    }

    #[test]
    fn delimiter_lines_are_their_own_regions() {
        let regions = split_regions("$$\nx\n$$\n");
        assert_eq!(regions[0], Region::Inside("$$\n".into()));
        assert_eq!(regions[2], Region::Inside("$$\n".into()));
    }

    #[test]
    fn same_line_pair_is_inside_without_toggling() {
        let text = "a $$x^2$$ b\nc = d\n";
        let regions = split_regions(text);
        assert_eq!(rejoin(&regions), text);
        assert!(regions.contains(&Region::Inside("$$x^2$$".into())));
        // The following line is still editable.
        assert!(matches!(regions.last(), Some(Region::Outside(t)) if t.contains("c = d")));
    }

    #[test]
    fn unterminated_block_fails_open() {
        let text = "$$\nrest is prose\nx = y\n";
        let regions = split_regions(text);
        assert_eq!(rejoin(&regions), text);
        assert_eq!(regions[0], Region::Inside("$$\n".into()));
        assert_eq!(
            regions[1],
            Region::Outside("rest is prose\nx = y\n".into())
        );
    }

    #[test]
    fn map_outside_leaves_inside_untouched() {
        let text = "a\n$$\nb\n$$\nc\n";
        let mapped = map_outside(text, |o| o.to_uppercase());
        assert_eq!(mapped, "A\n$$\nb\n$$\nC\n");
    }

    #[test]
    fn indented_delimiters_count() {
        let text = "  $$\n  x\n  $$\n";
        let regions = split_regions(text);
        assert_eq!(regions.len(), 3);
        assert!(matches!(regions[1], Region::Inside(_)));
    }
}
