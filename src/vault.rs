//! Markdown stores and the batch conversion driver.
//!
//! A [`MarkdownStore`] abstracts "a collection of Markdown files" so the
//! batch driver never touches the filesystem directly — editor hosts can
//! back it with their own document model, tests with an in-memory map.
//! [`DirStore`] is the filesystem implementation: a directory tree whose
//! `.md` files are the collection, written back atomically.
//!
//! [`convert_store`] is deliberately forgiving: one unreadable or
//! unwritable file produces a [`FileError`] in the report and the batch
//! moves on. Only problems with the store itself (missing root, unlistable
//! directory) are fatal.

use crate::config::ConversionOptions;
use crate::convert::{convert, write_atomic};
use crate::error::{FileError, MathmendError};
use crate::progress::BatchProgressCallback;
use crate::report::{BatchReport, FileOutcome};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A collection of Markdown files addressed by store-relative path.
pub trait MarkdownStore {
    /// List every Markdown file in the store, in a stable order.
    fn list_markdown_files(&self) -> Result<Vec<String>, MathmendError>;

    /// Read one file's content.
    fn read(&self, path: &str) -> Result<String, FileError>;

    /// Replace one file's content.
    fn write(&mut self, path: &str, content: &str) -> Result<(), FileError>;
}

/// Filesystem-backed store: all `.md` files under a root directory.
#[derive(Debug)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    /// Open a store rooted at `root`. The directory must exist.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, MathmendError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(MathmendError::InvalidStoreRoot { path: root });
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }

    fn walk(&self, dir: &Path, found: &mut Vec<String>) -> Result<(), MathmendError> {
        let entries = std::fs::read_dir(dir).map_err(|e| MathmendError::ListFailed {
            path: dir.to_path_buf(),
            source: e,
        })?;
        for entry in entries {
            let entry = entry.map_err(|e| MathmendError::ListFailed {
                path: dir.to_path_buf(),
                source: e,
            })?;
            let path = entry.path();
            if path.is_dir() {
                self.walk(&path, found)?;
            } else if path.extension().is_some_and(|ext| ext == "md") {
                if let Ok(rel) = path.strip_prefix(&self.root) {
                    found.push(rel.to_string_lossy().into_owned());
                }
            }
        }
        Ok(())
    }
}

impl MarkdownStore for DirStore {
    fn list_markdown_files(&self) -> Result<Vec<String>, MathmendError> {
        let mut found = Vec::new();
        self.walk(&self.root, &mut found)?;
        found.sort();
        Ok(found)
    }

    fn read(&self, path: &str) -> Result<String, FileError> {
        std::fs::read_to_string(self.resolve(path)).map_err(|e| FileError::ReadFailed {
            path: PathBuf::from(path),
            detail: e.to_string(),
        })
    }

    fn write(&mut self, path: &str, content: &str) -> Result<(), FileError> {
        write_atomic(&self.resolve(path), content).map_err(|e| FileError::WriteFailed {
            path: PathBuf::from(path),
            detail: e.to_string(),
        })
    }
}

/// Convert every Markdown file in `store`, writing back only files whose
/// content changed.
///
/// Per-file failures are recorded in the returned [`BatchReport`] and do not
/// stop the batch. `progress` receives one event per file plus batch
/// start/complete markers.
pub fn convert_store<S: MarkdownStore>(
    store: &mut S,
    options: &ConversionOptions,
    progress: &dyn BatchProgressCallback,
) -> Result<BatchReport, MathmendError> {
    let files = store.list_markdown_files()?;
    let total = files.len();
    info!(total, "starting batch conversion");
    progress.on_batch_start(total);

    let mut report = BatchReport::default();
    for (index, path) in files.iter().enumerate() {
        progress.on_file_start(index, total, path);

        let outcome = convert_one(store, options, path);
        match &outcome.error {
            None => {
                debug!(path, changed = outcome.changed, "file converted");
                progress.on_file_complete(index, total, path, outcome.changed);
            }
            Some(err) => {
                warn!(path, %err, "file failed, continuing batch");
                progress.on_file_error(index, total, path, &err.to_string());
            }
        }
        report.outcomes.push(outcome);
    }

    info!(
        changed = report.changed_count(),
        failed = report.error_count(),
        "batch conversion finished"
    );
    progress.on_batch_complete(total, report.changed_count(), report.error_count());
    Ok(report)
}

fn convert_one<S: MarkdownStore>(
    store: &mut S,
    options: &ConversionOptions,
    path: &str,
) -> FileOutcome {
    let text = match store.read(path) {
        Ok(t) => t,
        Err(e) => {
            return FileOutcome {
                path: path.to_string(),
                changed: false,
                error: Some(e),
            }
        }
    };

    let converted = convert(&text, options);
    if converted == text {
        return FileOutcome {
            path: path.to_string(),
            changed: false,
            error: None,
        };
    }

    match store.write(path, &converted) {
        Ok(()) => FileOutcome {
            path: path.to_string(),
            changed: true,
            error: None,
        },
        Err(e) => FileOutcome {
            path: path.to_string(),
            changed: false,
            error: Some(e),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::NoopProgressCallback;
    use std::collections::BTreeMap;

    /// In-memory store for driver tests.
    struct MemStore {
        files: BTreeMap<String, Result<String, ()>>,
    }

    impl MarkdownStore for MemStore {
        fn list_markdown_files(&self) -> Result<Vec<String>, MathmendError> {
            Ok(self.files.keys().cloned().collect())
        }

        fn read(&self, path: &str) -> Result<String, FileError> {
            match self.files.get(path) {
                Some(Ok(t)) => Ok(t.clone()),
                _ => Err(FileError::ReadFailed {
                    path: path.into(),
                    detail: "unreadable".into(),
                }),
            }
        }

        fn write(&mut self, path: &str, content: &str) -> Result<(), FileError> {
            self.files.insert(path.into(), Ok(content.into()));
            Ok(())
        }
    }

    #[test]
    fn batch_converts_and_reports() {
        let mut store = MemStore {
            files: BTreeMap::from([
                ("a.md".into(), Ok(r"value \(x\)".into())),
                ("b.md".into(), Ok("no math here".into())),
                ("c.md".into(), Err(())),
            ]),
        };
        let report =
            convert_store(&mut store, &ConversionOptions::default(), &NoopProgressCallback)
                .unwrap();

        assert_eq!(report.outcomes.len(), 3);
        assert_eq!(report.changed_count(), 1);
        assert_eq!(report.error_count(), 1);
        assert_eq!(store.files["a.md"], Ok("value $x$".to_string()));
        assert_eq!(store.files["b.md"], Ok("no math here".to_string()));
    }

    #[test]
    fn unchanged_files_are_not_written_back() {
        struct PanicOnWrite(MemStore);
        impl MarkdownStore for PanicOnWrite {
            fn list_markdown_files(&self) -> Result<Vec<String>, MathmendError> {
                self.0.list_markdown_files()
            }
            fn read(&self, path: &str) -> Result<String, FileError> {
                self.0.read(path)
            }
            fn write(&mut self, _path: &str, _content: &str) -> Result<(), FileError> {
                panic!("write must not be called for unchanged content");
            }
        }

        let mut store = PanicOnWrite(MemStore {
            files: BTreeMap::from([("plain.md".into(), Ok("just words".into()))]),
        });
        let report =
            convert_store(&mut store, &ConversionOptions::default(), &NoopProgressCallback)
                .unwrap();
        assert_eq!(report.changed_count(), 0);
    }

    #[test]
    fn dir_store_lists_only_markdown_recursively() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("a.md"), "x").unwrap();
        std::fs::write(dir.path().join("sub/b.md"), "y").unwrap();
        std::fs::write(dir.path().join("skip.txt"), "z").unwrap();

        let store = DirStore::open(dir.path()).unwrap();
        let files = store.list_markdown_files().unwrap();
        assert_eq!(files, vec!["a.md".to_string(), "sub/b.md".to_string()]);
    }

    #[test]
    fn dir_store_rejects_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent");
        assert!(matches!(
            DirStore::open(&missing),
            Err(MathmendError::InvalidStoreRoot { .. })
        ));
    }

    #[test]
    fn dir_store_batch_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("eq.md"), "\\[\nE = mc^2\n\\]\n").unwrap();

        let mut store = DirStore::open(dir.path()).unwrap();
        let report =
            convert_store(&mut store, &ConversionOptions::default(), &NoopProgressCallback)
                .unwrap();

        assert_eq!(report.changed_count(), 1);
        let out = std::fs::read_to_string(dir.path().join("eq.md")).unwrap();
        assert_eq!(out, "$$\nE = mc^2\n$$\n");
    }
}
