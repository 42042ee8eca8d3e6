pub mod logger;
pub mod time;

pub use logger::{TraceId, init_logger};
