//! Top-level conversion entry points.
//!
//! [`convert`] is the whole engine: pure text in, text out, no I/O and no
//! failure path. Malformed input — unterminated fences, unbalanced brackets,
//! half-open math blocks — degrades to "leave that part unchanged", never to
//! an error. [`convert_file`] adds the thin I/O shell around it with an
//! atomic write.
//!
//! # Stage order
//!
//! Protected regions are carved out first: code fences, then existing
//! display math within each prose segment, then link/URL spans within each
//! Outside region — display segmentation comes before URL carving so a URL
//! sitting inside a `$$` block can never split the block apart. The rewrite
//! stages run on what remains, in two groups with a re-segmentation between
//! them: the delimiter/environment/promotion group *creates* new `$$` blocks,
//! and re-splitting afterwards makes those blocks opaque to the implicit and
//! token heuristics that follow. A final whitespace pass runs once over the
//! reassembled prose segment to tidy blank lines around every block.

use crate::config::ConversionOptions;
use crate::error::MathmendError;
use crate::pipeline::implicit::BracketKind;
use crate::pipeline::{delimiters, display, environments, fences, implicit, lines, links, spacing, tokens};
use std::io::Write;
use std::path::Path;
use tracing::{debug, trace};

/// Normalise math delimiters in a Markdown document.
///
/// Pure and total: the only effect is the returned string, and every input
/// produces an output. Delimiter normalisation and whitespace tidy-up always
/// run; the remaining passes are gated by `options`.
///
/// # Example
/// ```rust
/// use mathmend::{convert, ConversionOptions};
///
/// let out = convert(r"Euler: \(e^{i\pi} + 1 = 0\)", &ConversionOptions::default());
/// assert_eq!(out, r"Euler: $e^{i\pi} + 1 = 0$");
/// ```
pub fn convert(text: &str, options: &ConversionOptions) -> String {
    let segments = fences::split(text);
    debug!(segments = segments.len(), bytes = text.len(), "converting document");

    let mut out = String::with_capacity(text.len() + 32);
    for segment in &segments {
        match segment.kind {
            fences::SegmentKind::Code => out.push_str(&segment.text),
            fences::SegmentKind::Prose => out.push_str(&convert_prose(&segment.text, options)),
        }
    }
    out
}

fn convert_prose(prose: &str, options: &ConversionOptions) -> String {
    if links::is_guarded_blob(prose) {
        trace!("prose segment is a link blob, skipping");
        return prose.to_string();
    }

    // Group one: stages that create new display blocks. Existing blocks are
    // opaque via map_outside, URLs via map_unlinked.
    let created = display::map_outside(prose, |outside| {
        map_unlinked(outside, |text| {
            let mut t = delimiters::normalize(text);
            if options.wrap_matrix_envs_in_display_math {
                t = environments::wrap(&t);
            }
            if options.wrap_bare_math_single_lines {
                t = lines::promote(&t);
            }
            t
        })
    });

    // Group two: heuristic inline rewrites. Re-splitting here makes the
    // blocks group one just created opaque too.
    let run_heuristics = options.plain_parens_as_delimiters
        || options.plain_brackets_as_delimiters
        || options.convert_bare_inline_latex;
    let rewritten = if run_heuristics {
        display::map_outside(&created, |outside| {
            map_unlinked(outside, |text| {
                let mut t = text.to_string();
                if options.plain_parens_as_delimiters {
                    t = implicit::convert(&t, BracketKind::Parens);
                }
                if options.plain_brackets_as_delimiters {
                    t = implicit::convert(&t, BracketKind::Brackets);
                }
                if options.convert_bare_inline_latex {
                    t = tokens::wrap(&t);
                }
                t
            })
        })
    } else {
        created
    };

    // Once per prose segment, over the re-spliced whole, so fence-adjacent
    // blank lines are judged with every block back in place.
    spacing::normalize(&rewritten)
}

/// Carve URL spans out of `outside` and rewrite only the interstitial text.
fn map_unlinked<F>(outside: &str, mut f: F) -> String
where
    F: FnMut(&str) -> String,
{
    let mut out = String::with_capacity(outside.len());
    for span in links::split_urls(outside) {
        match span {
            links::LinkSpan::Url(url) => out.push_str(&url),
            links::LinkSpan::Text(text) => out.push_str(&f(&text)),
        }
    }
    out
}

/// Convert one file on disk, writing the result to `output` atomically.
///
/// Returns whether the conversion changed the content. `input` and `output`
/// may be the same path; the temp-file-and-rename write means a crash can
/// never leave a half-written file behind.
pub fn convert_file(
    input: &Path,
    output: &Path,
    options: &ConversionOptions,
) -> Result<bool, MathmendError> {
    let text = std::fs::read_to_string(input).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            MathmendError::InputNotFound {
                path: input.to_path_buf(),
            }
        } else {
            MathmendError::ReadFailed {
                path: input.to_path_buf(),
                source: e,
            }
        }
    })?;

    let converted = convert(&text, options);
    let changed = converted != text;
    debug!(input = %input.display(), changed, "converted file");

    if changed || input != output {
        write_atomic(output, &converted)?;
    }
    Ok(changed)
}

/// Write `content` to `path` via a temp file in the same directory plus a
/// rename, so readers never observe a partial file.
pub(crate) fn write_atomic(path: &Path, content: &str) -> Result<(), MathmendError> {
    let io_err = |source| MathmendError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let mut tmp = match dir {
        Some(d) => tempfile::NamedTempFile::new_in(d),
        None => tempfile::NamedTempFile::new(),
    }
    .map_err(io_err)?;

    tmp.write_all(content.as_bytes()).map_err(io_err)?;
    tmp.persist(path)
        .map_err(|e| io_err(e.error))?;
    Ok(())
}
