// src/progress.rs
use std::path::Path;

/// Lightweight progress reporting used by the batch run.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the total number of items (if known).
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called when one file has been written.
    fn item_done(&mut self, _path: &Path) {}

    /// Called at the end of a successful run.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
