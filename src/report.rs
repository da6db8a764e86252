//! Outcome types for batch conversion runs.
//!
//! A batch over a store produces one [`FileOutcome`] per file and a
//! [`BatchReport`] wrapping them. Both serialise to JSON so a CLI `--json`
//! run or an editor host can consume the results structurally.

use crate::error::FileError;
use serde::{Deserialize, Serialize};

/// Result of converting a single file in a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileOutcome {
    /// Store-relative path of the file.
    pub path: String,
    /// Whether conversion altered the file's content.
    pub changed: bool,
    /// Set when the file failed to read or write. `changed` is false then.
    pub error: Option<FileError>,
}

impl FileOutcome {
    pub fn is_err(&self) -> bool {
        self.error.is_some()
    }
}

/// Aggregate result of a batch run over a store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchReport {
    pub outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    /// Files whose content was altered.
    pub fn changed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.changed).count()
    }

    /// Files that failed to read or write.
    pub fn error_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_err()).count()
    }

    /// Files that converted without error, changed or not.
    pub fn success_count(&self) -> usize {
        self.outcomes.len() - self.error_count()
    }

    /// One-line human summary, e.g. `"12 files: 3 changed, 1 failed"`.
    pub fn summary(&self) -> String {
        format!(
            "{} files: {} changed, {} failed",
            self.outcomes.len(),
            self.changed_count(),
            self.error_count()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(path: &str, changed: bool) -> FileOutcome {
        FileOutcome {
            path: path.into(),
            changed,
            error: None,
        }
    }

    #[test]
    fn counts_and_summary() {
        let report = BatchReport {
            outcomes: vec![
                ok("a.md", true),
                ok("b.md", false),
                FileOutcome {
                    path: "c.md".into(),
                    changed: false,
                    error: Some(FileError::ReadFailed {
                        path: "c.md".into(),
                        detail: "gone".into(),
                    }),
                },
            ],
        };
        assert_eq!(report.changed_count(), 1);
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.success_count(), 2);
        assert_eq!(report.summary(), "3 files: 1 changed, 1 failed");
    }

    #[test]
    fn report_serialises_to_json() {
        let report = BatchReport {
            outcomes: vec![ok("notes/a.md", true)],
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("notes/a.md"));
        assert!(json.contains("\"changed\":true"));
    }
}
