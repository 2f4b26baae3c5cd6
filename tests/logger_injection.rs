use std::sync::{Arc, Mutex};

use wall_coverage::adapters::outbound::{
    flush_logs, init_combined_logger, init_file_logger, init_noop_logger, MultiLogger,
};
use wall_coverage::domains::logger::{DomainLogger, DynLogger};

struct BridgeCapture {
    messages: Arc<Mutex<Vec<String>>>,
}

impl BridgeCapture {
    fn new() -> Self { Self { messages: Arc::new(Mutex::new(Vec::new())) } }
}

impl DomainLogger for BridgeCapture {
    fn info(&self, msg: &str) { self.messages.lock().unwrap().push(format!("INFO:{}", msg)); }
    fn warn(&self, msg: &str) { self.messages.lock().unwrap().push(format!("WARN:{}", msg)); }
    fn error(&self, msg: &str) { self.messages.lock().unwrap().push(format!("ERR:{}", msg)); }
}

#[test]
fn test_multi_logger_fans_out() {
    let primary = Arc::new(BridgeCapture::new());
    let secondary = Arc::new(BridgeCapture::new());
    let multi = MultiLogger::new(primary.clone() as DynLogger, Some(secondary.clone() as DynLogger));

    multi.info("one");
    multi.warn("two");
    multi.error("three");

    for capture in [&primary, &secondary] {
        let msgs = capture.messages.lock().unwrap();
        assert_eq!(*msgs, vec!["INFO:one", "WARN:two", "ERR:three"]);
    }
}

#[test]
fn test_multi_logger_without_secondary() {
    let primary = Arc::new(BridgeCapture::new());
    let multi = MultiLogger::new(primary.clone() as DynLogger, None);

    multi.info("only");
    assert_eq!(primary.messages.lock().unwrap().len(), 1);
}

#[test]
fn test_noop_and_console_loggers_accept_calls() {
    let noop = init_noop_logger();
    noop.info("ignored");
    noop.error("ignored-err");

    // No file configured: console only, which must not need a subscriber.
    let console = init_combined_logger(None);
    console.info("console");
    console.warn("console-warn");
}

// fast_log can be installed once per process, so this is the only test that does it.
#[test]
fn test_file_logger_writes_lines_after_flush() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logs").join("planner.log");
    let path_str = path.to_str().unwrap();

    let logger = init_file_logger(path_str).unwrap();
    logger.info("Trajectory abc generated with 0 obstacles in 0.001s");
    logger.warn("Trajectory abc already stored, skipping insert");
    flush_logs();

    assert!(path.exists());
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("Trajectory abc generated with 0 obstacles in 0.001s"));
    assert!(written.contains("already stored, skipping insert"));
}
