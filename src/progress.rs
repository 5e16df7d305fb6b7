// src/progress.rs
use crate::error::LookupError;

/// Lightweight progress reporting used by long-running operations (dictionary fetch).
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the total number of items (if known).
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called when one word was looked up successfully.
    fn item_done(&mut self, _word: &str) {}

    /// Called when one word was skipped: no entry, or the lookup failed.
    fn item_failed(&mut self, _word: &str, _error: &LookupError) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}
