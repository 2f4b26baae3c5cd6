use crate::domains::logger::{DomainLogger, DynLogger};
use std::sync::Arc;

/// Sends every message to a primary logger and, if present, a secondary one.
pub struct MultiLogger {
    primary: DynLogger,
    secondary: Option<DynLogger>,
}

impl MultiLogger {
    pub fn new(primary: DynLogger, secondary: Option<DynLogger>) -> Self {
        Self { primary, secondary }
    }
}

impl DomainLogger for MultiLogger {
    fn info(&self, msg: &str) {
        self.primary.info(msg);
        if let Some(sec) = &self.secondary {
            sec.info(msg);
        }
    }

    fn warn(&self, msg: &str) {
        self.primary.warn(msg);
        if let Some(sec) = &self.secondary {
            sec.warn(msg);
        }
    }

    fn error(&self, msg: &str) {
        self.primary.error(msg);
        if let Some(sec) = &self.secondary {
            sec.error(msg);
        }
    }
}

/// File logger with the console as secondary; console only if `path` is
/// `None` or the file backend cannot be installed.
pub fn init_combined_logger(path: Option<&str>) -> DynLogger {
    let console = super::init_console_logger();
    let Some(path) = path else {
        return console;
    };
    match super::init_file_logger(path) {
        Ok(file_logger) => Arc::new(MultiLogger::new(file_logger, Some(console))),
        Err(e) => {
            console.warn(&format!("{}; logging to console only", e));
            console
        }
    }
}
