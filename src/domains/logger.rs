use chrono::Utc;
use log::{error as log_error, info as log_info, warn as log_warn};
use std::path::Path;
use std::sync::Arc;

/// Logging port used by the application layer.
/// Logging never fails from the caller's point of view.
pub trait DomainLogger: Send + Sync + 'static {
    fn info(&self, msg: &str);
    fn warn(&self, msg: &str);
    fn error(&self, msg: &str);
}

pub type DynLogger = Arc<dyn DomainLogger>;

/// Trajectory log written through `fast_log`.
pub struct FileLogger;

impl FileLogger {
    /// Installs `fast_log` as the process-wide `log` backend writing to `path`.
    /// Fails if another `log` backend is already installed.
    pub fn init(path: &str) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        fast_log::init(
            fast_log::config::Config::new()
                .file(path)
                .level(log::LevelFilter::Info),
        )?;
        Ok(())
    }
}

impl DomainLogger for FileLogger {
    fn info(&self, msg: &str) {
        log_info!("{} - {}", Utc::now().to_rfc3339(), msg);
    }

    fn warn(&self, msg: &str) {
        log_warn!("{} - {}", Utc::now().to_rfc3339(), msg);
    }

    fn error(&self, msg: &str) {
        log_error!("{} - {}", Utc::now().to_rfc3339(), msg);
    }
}
