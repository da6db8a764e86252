//! Code-fence segmentation: split a document into alternating Code/Prose runs.
//!
//! Everything between a triple-backtick opener line and the next
//! triple-backtick line (inclusive of both fence lines) is a single `Code`
//! segment, reproduced byte-for-byte by every later stage. An opener with no
//! closer is *not* a fence: the rest of the document stays prose rather than
//! being swallowed into a phantom code block.

use std::ops::Range;

/// What a [`Segment`] contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// A fenced code block, opening and closing fence lines included.
    Code,
    /// Everything else.
    Prose,
}

/// A maximal contiguous run of the document.
///
/// Segments partition the input with no gaps or overlaps; concatenating
/// `text` in order reproduces the input exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub text: String,
    /// Byte range of `text` within the original document.
    pub span: Range<usize>,
}

fn is_fence_line(line: &str) -> bool {
    line.trim_start().starts_with("```")
}

/// Split `input` into an ordered sequence of Code and Prose segments.
pub fn split(input: &str) -> Vec<Segment> {
    let lines: Vec<&str> = input.split_inclusive('\n').collect();
    let mut segments = Vec::new();
    let mut prose = String::new();
    let mut prose_start = 0usize;
    let mut offset = 0usize;
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        if is_fence_line(line) {
            // Only a fence if a closing line exists further down.
            if let Some(j) = (i + 1..lines.len()).find(|&j| is_fence_line(lines[j])) {
                if !prose.is_empty() {
                    segments.push(Segment {
                        kind: SegmentKind::Prose,
                        text: std::mem::take(&mut prose),
                        span: prose_start..offset,
                    });
                }
                let code: String = lines[i..=j].concat();
                let code_len = code.len();
                segments.push(Segment {
                    kind: SegmentKind::Code,
                    text: code,
                    span: offset..offset + code_len,
                });
                offset += code_len;
                prose_start = offset;
                i = j + 1;
                continue;
            }
        }
        if prose.is_empty() {
            prose_start = offset;
        }
        prose.push_str(line);
        offset += line.len();
        i += 1;
    }

    if !prose.is_empty() {
        segments.push(Segment {
            kind: SegmentKind::Prose,
            text: prose,
            span: prose_start..offset,
        });
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejoin(segments: &[Segment]) -> String {
        segments.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn fenced_block_is_one_code_segment() {
        let input = "before\n```rust\nlet x = 1;\n```\nafter\n";
        let segs = split(input);
        assert_eq!(segs.len(), 3);
        assert_eq!(segs[0].kind, SegmentKind::Prose);
        assert_eq!(segs[1].kind, SegmentKind::Code);
        assert_eq!(segs[1].text, "```rust\nlet x = 1;\n```\n");
        assert_eq!(segs[2].kind, SegmentKind::Prose);
        assert_eq!(rejoin(&segs), input);
    }

    #[test]
    fn segments_partition_without_gaps() {
        let input = "a\n```\nb\n```\nc\n```js\nd\n```";
        let segs = split(input);
        assert_eq!(rejoin(&segs), input);
        let mut pos = 0;
        for s in &segs {
            assert_eq!(s.span.start, pos);
            pos = s.span.end;
        }
        assert_eq!(pos, input.len());
    }

    #[test]
    fn unterminated_fence_stays_prose() {
        let input = "text\n```\nnot closed\n";
        let segs = split(input);
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].kind, SegmentKind::Prose);
        assert_eq!(segs[0].text, input);
    }

    #[test]
    fn indented_fences_are_recognised() {
        let input = "  ```\ncode\n  ```\n";
        let segs = split(input);
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].kind, SegmentKind::Code);
    }

    #[test]
    fn empty_input_yields_no_segments() {
        assert!(split("").is_empty());
    }

    #[test]
    fn no_trailing_newline_preserved() {
        let input = "plain text without newline";
        let segs = split(input);
        assert_eq!(rejoin(&segs), input);
    }
}
