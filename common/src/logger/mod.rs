pub mod init;
pub mod spans;
pub mod trace_id;

pub use init::init_logger;
pub use spans::cycle_span;
pub use trace_id::TraceId;
