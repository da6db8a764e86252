//! Pipeline stages for math-delimiter normalisation.
//!
//! Each submodule implements exactly one transformation step over tagged
//! text regions. Keeping stages separate makes each independently testable
//! and makes the central invariant — code blocks, URLs, and existing display
//! math are never rewritten — structural: a stage simply never receives
//! those regions.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ fences ──▶ links ──▶ display ──▶ rewrite stages ──▶ spacing
//!           (code)     (URLs)    (regions)   (4 of them optional)
//! ```
//!
//! 1. [`fences`]       — carve fenced code blocks out as verbatim segments
//! 2. [`links`]        — short-circuit link blobs, carve out embedded URLs
//! 3. [`display`]      — split prose into inside/outside display-math regions
//! 4. [`delimiters`]   — `\(…\)` / `\[…\]` → dollar form (always on)
//! 5. [`environments`] — wrap bare matrix/align environments (optional)
//! 6. [`lines`]        — promote isolated math-heavy lines (optional)
//! 7. [`implicit`]     — balanced `(…)`/`[…]` spans → inline math via the
//!    [`classify`] heuristics (optional, per pair)
//! 8. [`tokens`]       — wrap isolated bare LaTeX tokens (optional)
//! 9. [`spacing`]      — trim blank lines hugging `$$` fences (always on)

pub mod classify;
pub mod delimiters;
pub mod display;
pub mod environments;
pub mod fences;
pub mod implicit;
pub mod lines;
pub mod links;
pub mod spacing;
pub mod tokens;
