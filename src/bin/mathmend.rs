//! CLI binary for mathmend.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ConversionOptions` and drives single-file, stdin, or directory-batch
//! conversion.

use anyhow::{bail, Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use mathmend::{
    convert, convert_store, BatchProgressCallback, ConversionOptions, DirStore,
};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback for directory batches: a live progress bar
/// plus one log line per changed or failed file.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Self {
        let bar = ProgressBar::new(0); // length set in on_batch_start
        bar.set_style(
            ProgressStyle::with_template(
                "{spinner:.cyan} {prefix:.bold}  [{bar:42.green/238}] {pos:>3}/{len} files  {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▉▊▋▌▍▎▏  "),
        );
        bar.set_prefix("Converting");
        Self { bar }
    }
}

impl BatchProgressCallback for CliProgressCallback {
    fn on_batch_start(&self, total_files: usize) {
        self.bar.set_length(total_files as u64);
    }

    fn on_file_start(&self, _index: usize, _total: usize, path: &str) {
        self.bar.set_message(path.to_string());
    }

    fn on_file_complete(&self, _index: usize, _total: usize, path: &str, changed: bool) {
        if changed {
            self.bar
                .println(format!("  {} {}", green("✓"), path));
        }
        self.bar.inc(1);
    }

    fn on_file_error(&self, _index: usize, _total: usize, path: &str, error: &str) {
        // Truncate very long error messages to keep output tidy.
        let msg = if error.len() > 80 {
            format!("{}\u{2026}", &error[..79])
        } else {
            error.to_string()
        };
        self.bar
            .println(format!("  {} {}  {}", red("✗"), path, red(&msg)));
        self.bar.inc(1);
    }

    fn on_batch_complete(&self, total_files: usize, changed_count: usize, error_count: usize) {
        self.bar.finish_and_clear();
        if error_count == 0 {
            eprintln!(
                "{} {} files scanned, {} changed",
                green("✔"),
                bold(&total_files.to_string()),
                bold(&changed_count.to_string()),
            );
        } else {
            eprintln!(
                "{} {} files scanned, {} changed, {} failed",
                cyan("⚠"),
                bold(&total_files.to_string()),
                bold(&changed_count.to_string()),
                red(&error_count.to_string()),
            );
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Fix a single file, print to stdout
  mathmend notes.md

  # Fix a file in place
  mathmend -w notes.md

  # Pipe through stdin/stdout
  pbpaste | mathmend - | pbcopy

  # Fix every .md file under a directory, in place
  mathmend -w ~/vault

  # Enable the heuristic passes
  mathmend -w --parens --brackets --bare-latex notes.md

  # Use stored settings, report as JSON
  mathmend -w --settings ~/.config/mathmend.json --json ~/vault

CONVERSIONS:
  always        \( x \)      →  $x$
  always        \[ ... \]    →  $$ block
  always        [ ⏎ ... ⏎ ]  →  $$ block
  default       bare \begin{bmatrix}...\end{bmatrix}  →  wrapped in $$
  --parens      mathy ( ... )   →  $...$
  --brackets    mathy [ ... ]   →  $...$
  --bare-latex  bare \sqrt{2}, x_1, 90^\circ  →  $...$
  --bare-lines  isolated equation lines  →  $$ block

  Code fences, URLs, Markdown links, and existing $/$$ math are never touched.

ENVIRONMENT VARIABLES:
  MATHMEND_SETTINGS   Path to a settings JSON file (same as --settings)
  MATHMEND_*          Every pass flag has a matching fallback, e.g.
                      MATHMEND_PARENS=1, MATHMEND_NO_MATRIX_ENVS=1
  RUST_LOG            Tracing filter, e.g. RUST_LOG=mathmend=debug
"#;

/// Normalise LaTeX math delimiters in Markdown to dollar-sign form.
#[derive(Parser, Debug)]
#[command(
    name = "mathmend",
    version,
    about = "Normalise LaTeX math delimiters in Markdown to dollar-sign form",
    long_about = "Rewrite \\(...\\), \\[...\\], bare bracket blocks, and (optionally) naked \
LaTeX environments, mathy parentheses, and bare tokens into $...$ / $$...$$ form, \
leaving code fences, links, and existing math untouched.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Markdown file, directory of .md files, or `-` for stdin.
    input: String,

    /// Write output to this file instead of stdout (single-file mode).
    #[arg(short, long, conflicts_with = "write")]
    output: Option<PathBuf>,

    /// Rewrite the input file(s) in place. Required for directory input.
    #[arg(short, long)]
    write: bool,

    /// Settings JSON file; CLI flags override its values.
    #[arg(long, env = "MATHMEND_SETTINGS")]
    settings: Option<PathBuf>,

    /// Convert mathy parenthesised spans: (a+b) → $a+b$.
    #[arg(long, env = "MATHMEND_PARENS")]
    parens: bool,

    /// Convert mathy bracketed spans: [x^2] → $x^2$.
    #[arg(long, env = "MATHMEND_BRACKETS")]
    brackets: bool,

    /// Wrap bare LaTeX tokens: \sqrt{2} → $\sqrt{2}$.
    #[arg(long, env = "MATHMEND_BARE_LATEX")]
    bare_latex: bool,

    /// Promote isolated equation lines to $$ blocks.
    #[arg(long, env = "MATHMEND_BARE_LINES")]
    bare_lines: bool,

    /// Do not wrap bare matrix/align environments in $$.
    #[arg(long, env = "MATHMEND_NO_MATRIX_ENVS")]
    no_matrix_envs: bool,

    /// Emit the batch report as JSON (directory mode).
    #[arg(long, env = "MATHMEND_JSON")]
    json: bool,

    /// Disable the progress bar.
    #[arg(long, env = "MATHMEND_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "MATHMEND_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "MATHMEND_QUIET")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // stderr only: stdout may be carrying the converted document.
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let options = build_options(&cli)?;

    if cli.input == "-" {
        return run_stdin(&cli, &options);
    }

    let path = PathBuf::from(&cli.input);
    if path.is_dir() {
        run_batch(&cli, &options, &path)
    } else {
        run_single(&cli, &options, &path)
    }
}

fn run_stdin(cli: &Cli, options: &ConversionOptions) -> Result<()> {
    if cli.write {
        bail!("--write cannot be combined with stdin input");
    }
    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .context("failed to read stdin")?;

    let converted = convert(&text, options);
    match &cli.output {
        Some(path) => std::fs::write(path, &converted)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => write_stdout(&converted)?,
    }
    Ok(())
}

fn run_single(cli: &Cli, options: &ConversionOptions, path: &Path) -> Result<()> {
    if cli.write {
        let changed = mathmend::convert_file(path, path, options)?;
        if !cli.quiet {
            if changed {
                eprintln!("{} {}", green("✓"), bold(&path.display().to_string()));
            } else {
                eprintln!("{} {}", dim("·"), dim(&path.display().to_string()));
            }
        }
        return Ok(());
    }

    match &cli.output {
        Some(out) => {
            mathmend::convert_file(path, out, options)?;
            if !cli.quiet {
                eprintln!(
                    "{} {} {} {}",
                    green("✓"),
                    path.display(),
                    dim("→"),
                    bold(&out.display().to_string()),
                );
            }
        }
        None => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            write_stdout(&convert(&text, options))?;
        }
    }
    Ok(())
}

fn run_batch(cli: &Cli, options: &ConversionOptions, root: &Path) -> Result<()> {
    if !cli.write {
        bail!(
            "directory input requires --write (refusing to dump {} to stdout)",
            root.display()
        );
    }

    let mut store = DirStore::open(root)?;
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;

    let report = if show_progress {
        convert_store(&mut store, options, &CliProgressCallback::new())?
    } else {
        convert_store(&mut store, options, &mathmend::NoopProgressCallback)?
    };

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("failed to serialise report")?
        );
    } else if !show_progress && !cli.quiet {
        eprintln!("{}", report.summary());
    }

    if report.error_count() > 0 {
        bail!("{} file(s) failed", report.error_count());
    }
    Ok(())
}

/// Map settings file plus CLI flags to `ConversionOptions`.
///
/// CLI flags are one-directional overrides: a given flag turns its pass on
/// (or, for `--no-matrix-envs`, off) on top of whatever the settings say.
fn build_options(cli: &Cli) -> Result<ConversionOptions> {
    let mut options = match &cli.settings {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read settings file {}", path.display()))?;
            ConversionOptions::from_settings_json(&json)?
        }
        None => ConversionOptions::default(),
    };

    if cli.parens {
        options.plain_parens_as_delimiters = true;
    }
    if cli.brackets {
        options.plain_brackets_as_delimiters = true;
    }
    if cli.bare_latex {
        options.convert_bare_inline_latex = true;
    }
    if cli.bare_lines {
        options.wrap_bare_math_single_lines = true;
    }
    if cli.no_matrix_envs {
        options.wrap_matrix_envs_in_display_math = false;
    }
    Ok(options)
}

fn write_stdout(text: &str) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle
        .write_all(text.as_bytes())
        .context("failed to write to stdout")?;
    Ok(())
}
