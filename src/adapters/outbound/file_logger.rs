use crate::domains::logger::{DynLogger, FileLogger};
use std::sync::Arc;

/// Installs the `fast_log` file backend and returns a logger writing to it.
pub fn init_file_logger(path: &str) -> Result<DynLogger, String> {
    FileLogger::init(path).map_err(|e| format!("Failed to initialize fast_log at {}: {}", path, e))?;
    Ok(Arc::new(FileLogger))
}

/// Blocks until buffered `log` records reach their sink. `fast_log` writes from
/// a background thread, so call this before the process exits.
pub fn flush_logs() {
    log::Log::flush(log::logger());
}
