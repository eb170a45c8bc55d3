/// Business logic layer for message-service
pub mod id_generator;
pub mod message_service;

pub use id_generator::{IdGenerator, UuidIdGenerator};
pub use message_service::MessageService;
