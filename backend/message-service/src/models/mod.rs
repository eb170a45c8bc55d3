/// Data models for message-service
pub mod message;

pub use message::{CreateMessageRequest, Message};
