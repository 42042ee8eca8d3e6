pub mod message;
pub mod noop;
pub mod sendgrid;
pub mod types;

pub use message::{alert_body, alert_subject};
pub use noop::NoopNotifier;
pub use sendgrid::SendGridNotifier;
pub use types::Notifier;
