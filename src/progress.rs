//! Progress-callback trait for per-file batch events.
//!
//! Inject an [`Arc<dyn BatchProgressCallback>`] into
//! [`crate::vault::convert_store`] to receive real-time events as the batch
//! processes each file.
//!
//! The callback approach is the least-invasive integration point: callers
//! can forward events to a terminal progress bar, an editor notification
//! sink, or a log file without the library knowing anything about how the
//! host application communicates. The trait is `Send + Sync` so a single
//! callback can be shared across threads.

use std::sync::Arc;

/// Called by the batch driver as it processes each file.
///
/// All methods have default no-op implementations so callers only override
/// what they care about.
pub trait BatchProgressCallback: Send + Sync {
    /// Called once before any file is read.
    ///
    /// * `total_files` — number of files that will be processed
    fn on_batch_start(&self, total_files: usize) {
        let _ = total_files;
    }

    /// Called just before a file is read and converted.
    ///
    /// * `index`       — 0-indexed position in the batch
    /// * `total_files` — total files in the batch
    /// * `path`        — store-relative path of the file
    fn on_file_start(&self, index: usize, total_files: usize, path: &str) {
        let _ = (index, total_files, path);
    }

    /// Called when a file has been converted (and written back, if it changed).
    ///
    /// * `changed` — whether the conversion altered the file's content
    fn on_file_complete(&self, index: usize, total_files: usize, path: &str, changed: bool) {
        let _ = (index, total_files, path, changed);
    }

    /// Called when a file fails to read or write. The batch continues.
    ///
    /// * `error` — human-readable error description
    fn on_file_error(&self, index: usize, total_files: usize, path: &str, error: &str) {
        let _ = (index, total_files, path, error);
    }

    /// Called once after all files have been attempted.
    ///
    /// * `changed_count` — files whose content was altered
    /// * `error_count`   — files that failed
    fn on_batch_complete(&self, total_files: usize, changed_count: usize, error_count: usize) {
        let _ = (total_files, changed_count, error_count);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl BatchProgressCallback for NoopProgressCallback {}

/// Convenience alias for a shared, thread-safe callback. Borrow it with
/// `&*cb` to pass it to [`crate::vault::convert_store`].
pub type ProgressCallback = Arc<dyn BatchProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct TrackingCallback {
        starts: AtomicUsize,
        completes: AtomicUsize,
        errors: AtomicUsize,
        batch_total: AtomicUsize,
    }

    impl BatchProgressCallback for TrackingCallback {
        fn on_batch_start(&self, total_files: usize) {
            self.batch_total.store(total_files, Ordering::SeqCst);
        }

        fn on_file_start(&self, _index: usize, _total: usize, _path: &str) {
            self.starts.fetch_add(1, Ordering::SeqCst);
        }

        fn on_file_complete(&self, _index: usize, _total: usize, _path: &str, _changed: bool) {
            self.completes.fetch_add(1, Ordering::SeqCst);
        }

        fn on_file_error(&self, _index: usize, _total: usize, _path: &str, _error: &str) {
            self.errors.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_batch_start(3);
        cb.on_file_start(0, 3, "a.md");
        cb.on_file_complete(0, 3, "a.md", true);
        cb.on_file_error(1, 3, "b.md", "read failed");
        cb.on_batch_complete(3, 1, 1);
    }

    #[test]
    fn tracking_callback_receives_events() {
        let tracker = TrackingCallback {
            starts: AtomicUsize::new(0),
            completes: AtomicUsize::new(0),
            errors: AtomicUsize::new(0),
            batch_total: AtomicUsize::new(0),
        };

        tracker.on_batch_start(2);
        tracker.on_file_start(0, 2, "a.md");
        tracker.on_file_complete(0, 2, "a.md", false);
        tracker.on_file_start(1, 2, "b.md");
        tracker.on_file_error(1, 2, "b.md", "oh no");

        assert_eq!(tracker.batch_total.load(Ordering::SeqCst), 2);
        assert_eq!(tracker.starts.load(Ordering::SeqCst), 2);
        assert_eq!(tracker.completes.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.errors.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn arc_dyn_callback_works() {
        let cb: ProgressCallback = Arc::new(NoopProgressCallback);
        cb.on_batch_start(10);
        cb.on_file_complete(0, 10, "x.md", true);
    }
}
