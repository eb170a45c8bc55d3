/// HTTP handlers for message-service
///
/// - Messages: list the most recent messages, post a new one
/// - Health: liveness and store readiness probes
pub mod health;
pub mod messages;

pub use health::{health_summary, liveness_check, readiness_check};
pub use messages::{create_message, json_config, list_messages};
