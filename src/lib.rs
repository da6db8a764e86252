//! # mathmend
//!
//! Normalise LaTeX math delimiters in Markdown to dollar-sign form.
//!
//! ## Why this crate?
//!
//! Text pasted from chat assistants, PDF extractors, and OCR tools arrives
//! with math in a zoo of spellings — `\(x\)`, `\[…\]`, bare `[ … ]` blocks,
//! naked `\begin{bmatrix}` environments, or no delimiters at all. Markdown
//! renderers want `$…$` and `$$…$$`. This crate rewrites the former into the
//! latter without ever touching code fences, URLs, or math that is already
//! well-formed.
//!
//! ## Pipeline Overview
//!
//! ```text
//! Markdown
//!  │
//!  ├─ 1. Fences       carve out ``` code blocks (verbatim forever)
//!  ├─ 2. Links        short-circuit link blobs, carve out URLs
//!  ├─ 3. Display      segment existing $$ blocks (fixed points)
//!  ├─ 4. Delimiters   \(…\) → $…$,  \[…\] and [-lines → $$ blocks
//!  ├─ 5. Environments wrap bare \begin{bmatrix}… in $$       (option)
//!  ├─ 6. Lines        promote isolated equation lines to $$  (option)
//!  ├─ 7. Implicit     mathy (…) / […] spans → $…$            (options)
//!  ├─ 8. Tokens       bare \sqrt{2}, x_1, 90^\circ → $…$     (option)
//!  └─ 9. Spacing      trim blank lines hugging $$ fences
//! ```
//!
//! Conversion is pure and total: no I/O, no error path. Anything malformed
//! — an unterminated fence, an unbalanced bracket, a `$$` that never closes
//! — degrades to "leave it unchanged".
//!
//! ## Quick Start
//!
//! ```rust
//! use mathmend::{convert, ConversionOptions};
//!
//! let pasted = r"The identity \(e^{i\pi} + 1 = 0\) is due to Euler.";
//! let fixed = convert(pasted, &ConversionOptions::default());
//! assert_eq!(fixed, r"The identity $e^{i\pi} + 1 = 0$ is due to Euler.");
//! ```
//!
//! Batch mode over a directory of notes:
//!
//! ```rust,no_run
//! use mathmend::{convert_store, ConversionOptions, DirStore, NoopProgressCallback};
//!
//! let mut store = DirStore::open("notes/")?;
//! let report = convert_store(&mut store, &ConversionOptions::default(), &NoopProgressCallback)?;
//! eprintln!("{}", report.summary());
//! # Ok::<(), mathmend::MathmendError>(())
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `mathmend` binary (clap + anyhow + indicatif + tracing-subscriber) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! mathmend = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod pipeline;
pub mod progress;
pub mod report;
pub mod vault;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionOptions, ConversionOptionsBuilder};
pub use convert::{convert, convert_file};
pub use error::{FileError, MathmendError};
pub use progress::{BatchProgressCallback, NoopProgressCallback, ProgressCallback};
pub use report::{BatchReport, FileOutcome};
pub use vault::{convert_store, DirStore, MarkdownStore};
