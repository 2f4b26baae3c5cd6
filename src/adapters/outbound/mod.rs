pub mod console_logger;
pub mod file_logger;
pub mod file_store;
pub mod in_memory_store;
pub mod multi_logger;
pub mod noop_logger;
pub mod postgres;
pub mod storage;

pub use console_logger::*;
pub use file_logger::*;
pub use file_store::*;
pub use in_memory_store::*;
pub use multi_logger::*;
pub use noop_logger::*;
pub use postgres::*;
pub use storage::*;
