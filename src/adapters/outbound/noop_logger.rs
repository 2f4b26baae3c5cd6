use crate::domains::logger::{DomainLogger, DynLogger};
use std::sync::Arc;

struct NoOp;

impl DomainLogger for NoOp {
    fn info(&self, _msg: &str) {}
    fn warn(&self, _msg: &str) {}
    fn error(&self, _msg: &str) {}
}

/// Discards everything; the default logger in tests.
pub fn init_noop_logger() -> DynLogger {
    Arc::new(NoOp)
}
