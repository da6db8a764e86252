//! Error types for the mathmend library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`MathmendError`] — **Fatal**: the run cannot proceed at all (settings
//!   blob unparseable, store root missing). Returned as `Err(MathmendError)`
//!   from the top-level entry points.
//!
//! * [`FileError`] — **Non-fatal**: a single file in a batch failed (read
//!   error, write error) but every other file is fine. Stored inside
//!   [`crate::report::FileOutcome`] so callers can inspect partial success
//!   rather than losing the whole batch to one bad file.
//!
//! Note what is *not* here: conversion itself never fails. [`crate::convert`]
//! is total — malformed input passes through unchanged — so there is no
//! `ConversionFailed` variant by construction.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the mathmend library.
///
/// Per-file failures in batch mode use [`FileError`] and are stored in
/// [`crate::report::FileOutcome`] rather than propagated here.
#[derive(Debug, Error)]
pub enum MathmendError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input path was not found.
    #[error("input not found: '{path}'\nCheck the path exists and is readable.")]
    InputNotFound { path: PathBuf },

    /// Could not read an input file or stream.
    #[error("failed to read '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Settings errors ───────────────────────────────────────────────────
    /// The settings JSON blob did not parse.
    #[error("invalid settings JSON: {detail}")]
    InvalidSettings { detail: String },

    /// Could not read the settings file.
    #[error("failed to read settings file '{path}': {source}")]
    SettingsReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Store errors ──────────────────────────────────────────────────────
    /// The directory given as a store root does not exist or is not a directory.
    #[error("store root '{path}' is not a directory")]
    InvalidStoreRoot { path: PathBuf },

    /// Could not enumerate the files under the store root.
    #[error("failed to list files under '{path}': {source}")]
    ListFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Output errors ─────────────────────────────────────────────────────
    /// Could not create or write an output file.
    #[error("failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A non-fatal error for a single file in a batch run.
///
/// Stored in [`crate::report::FileOutcome`] when a file fails. The batch
/// continues with the remaining files.
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
pub enum FileError {
    /// The file could not be read.
    #[error("read failed for '{path}': {detail}")]
    ReadFailed { path: PathBuf, detail: String },

    /// The converted output could not be written back.
    #[error("write failed for '{path}': {detail}")]
    WriteFailed { path: PathBuf, detail: String },
}
