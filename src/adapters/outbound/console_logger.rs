use crate::domains::logger::{DomainLogger, DynLogger};
use std::sync::Arc;

/// Forwards domain log lines to the process `tracing` subscriber.
struct TracingBridge;

impl DomainLogger for TracingBridge {
    fn info(&self, msg: &str) {
        tracing::info!(target: "wall_coverage::domain", "{}", msg);
    }

    fn warn(&self, msg: &str) {
        tracing::warn!(target: "wall_coverage::domain", "{}", msg);
    }

    fn error(&self, msg: &str) {
        tracing::error!(target: "wall_coverage::domain", "{}", msg);
    }
}

/// Console logger, also the fallback when no log file is configured.
pub fn init_console_logger() -> DynLogger {
    Arc::new(TracingBridge)
}
