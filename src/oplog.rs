//! File-operation logging port
//!
//! Storage-affecting operations are reported through an injected port
//! rather than a global logger, so deployments can route them to a
//! dedicated audit log. The deletion and move records exist for the
//! storage-maintenance tooling that shares this log; the pipeline itself
//! emits writes, resizes, and failures.

use tracing::{error, info};

/// Sink for structured records of operations against attachment storage.
pub trait FileOperationLog: Send + Sync {
    /// A file was written to storage.
    fn file_written(&self, path: &str, size: u64);

    /// An image was re-encoded before storage.
    fn image_resized(&self, path: &str, original_bytes: u64, resized_bytes: u64);

    /// A file was deleted from storage.
    fn file_deleted(&self, path: &str, reason: &str);

    /// A file was moved or renamed within storage.
    fn file_moved(&self, from: &str, to: &str);

    /// An operation against storage failed.
    fn operation_failed(&self, operation: &str, path: &str, detail: &str);
}

/// Default port implementation emitting `tracing` events on a dedicated
/// target, one record per operation.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingFileLog;

const TARGET: &str = "file_operations";

impl FileOperationLog for TracingFileLog {
    fn file_written(&self, path: &str, size: u64) {
        info!(target: TARGET, path, size, "WRITE");
    }

    fn image_resized(&self, path: &str, original_bytes: u64, resized_bytes: u64) {
        info!(target: TARGET, path, original_bytes, resized_bytes, "RESIZE");
    }

    fn file_deleted(&self, path: &str, reason: &str) {
        info!(target: TARGET, path, reason, "DELETE");
    }

    fn file_moved(&self, from: &str, to: &str) {
        info!(target: TARGET, from, to, "MOVE");
    }

    fn operation_failed(&self, operation: &str, path: &str, detail: &str) {
        error!(target: TARGET, operation, path, detail, "ERROR");
    }
}
