//! Configuration types for math-delimiter normalisation.
//!
//! All conversion behaviour is controlled through [`ConversionOptions`],
//! built via its [`ConversionOptionsBuilder`] or deserialised from a
//! settings JSON blob. Keeping every knob in one struct makes it trivial to
//! share options across threads, serialise them for logging, and diff two
//! runs to understand why their outputs differ.
//!
//! # Settings semantics
//!
//! The serde representation is intentionally sparse: every field carries
//! `#[serde(default)]`, so a stored settings object only needs to name the
//! options that differ from the defaults. Unknown keys are ignored, which
//! lets older binaries read settings written by newer ones.

use crate::error::MathmendError;
use serde::{Deserialize, Serialize};

/// Options for one conversion run.
///
/// Built via [`ConversionOptions::builder()`], [`ConversionOptions::default()`],
/// or [`ConversionOptions::from_settings_json()`].
///
/// # Example
/// ```rust
/// use mathmend::ConversionOptions;
///
/// let options = ConversionOptions::builder()
///     .plain_parens_as_delimiters(true)
///     .wrap_bare_math_single_lines(true)
///     .build();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConversionOptions {
    /// Host-side gate: should paste events be converted at all?
    /// Default: true.
    ///
    /// Carried in the settings record for hosts (editors, paste hooks) that
    /// decide *whether* to call [`crate::convert`]. The engine itself never
    /// reads it — once `convert` is called, delimiter normalisation always
    /// runs.
    pub enable_default_paste_conversion: bool,

    /// Wrap bare `\begin{matrix}…\end{matrix}`-style environments in
    /// display math. Default: true.
    ///
    /// Markdown renderers only typeset environments that sit inside `$$`
    /// fences; a bare environment renders as literal text. The wrapper only
    /// fires outside existing display math, so well-formed documents pass
    /// through untouched.
    pub wrap_matrix_envs_in_display_math: bool,

    /// Convert balanced `(…)` spans whose content looks like LaTeX into
    /// inline math. Default: false.
    ///
    /// Heuristic and therefore opt-in: parentheses are the most overloaded
    /// characters in prose, and even with the enumeration / cross-reference
    /// guards a false positive rewrites text the author meant literally.
    pub plain_parens_as_delimiters: bool,

    /// Convert balanced `[…]` spans whose content looks like LaTeX into
    /// inline math. Default: false.
    ///
    /// Opt-in for the same reason as the paren pass, with the extra hazard
    /// that `[…]` is Markdown link syntax.
    pub plain_brackets_as_delimiters: bool,

    /// Wrap isolated bare LaTeX tokens (`\sqrt{2}`, `x_1`, `90^\circ`) in
    /// inline dollars. Default: false.
    ///
    /// Useful for paste sources that strip delimiters but keep the macros.
    /// Risky on technical prose where `a_b` identifiers are common, hence
    /// off by default.
    pub convert_bare_inline_latex: bool,

    /// Promote isolated math-heavy lines to display-math blocks.
    /// Default: false.
    ///
    /// The line classifier is the loosest heuristic in the pipeline (any
    /// operator character can trigger it), so this stays off unless the
    /// caller knows the input is mostly displayed equations.
    pub wrap_bare_math_single_lines: bool,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            enable_default_paste_conversion: true,
            wrap_matrix_envs_in_display_math: true,
            plain_parens_as_delimiters: false,
            plain_brackets_as_delimiters: false,
            convert_bare_inline_latex: false,
            wrap_bare_math_single_lines: false,
        }
    }
}

impl ConversionOptions {
    /// Create a new builder for `ConversionOptions`.
    pub fn builder() -> ConversionOptionsBuilder {
        ConversionOptionsBuilder {
            options: Self::default(),
        }
    }

    /// Parse options from a settings JSON object.
    ///
    /// Missing fields take their defaults, unknown fields are ignored.
    pub fn from_settings_json(json: &str) -> Result<Self, MathmendError> {
        serde_json::from_str(json).map_err(|e| MathmendError::InvalidSettings {
            detail: e.to_string(),
        })
    }

    /// Serialise options as a settings JSON object (pretty-printed).
    pub fn to_settings_json(&self) -> String {
        // Serialisation of a plain bool struct cannot fail.
        serde_json::to_string_pretty(self).expect("options serialise")
    }
}

/// Builder for [`ConversionOptions`].
#[derive(Debug)]
pub struct ConversionOptionsBuilder {
    options: ConversionOptions,
}

impl ConversionOptionsBuilder {
    pub fn enable_default_paste_conversion(mut self, v: bool) -> Self {
        self.options.enable_default_paste_conversion = v;
        self
    }

    pub fn wrap_matrix_envs_in_display_math(mut self, v: bool) -> Self {
        self.options.wrap_matrix_envs_in_display_math = v;
        self
    }

    pub fn plain_parens_as_delimiters(mut self, v: bool) -> Self {
        self.options.plain_parens_as_delimiters = v;
        self
    }

    pub fn plain_brackets_as_delimiters(mut self, v: bool) -> Self {
        self.options.plain_brackets_as_delimiters = v;
        self
    }

    pub fn convert_bare_inline_latex(mut self, v: bool) -> Self {
        self.options.convert_bare_inline_latex = v;
        self
    }

    pub fn wrap_bare_math_single_lines(mut self, v: bool) -> Self {
        self.options.wrap_bare_math_single_lines = v;
        self
    }

    /// Build the options. All combinations are valid.
    pub fn build(self) -> ConversionOptions {
        self.options
    }
}
