//! Message persistence
//!
//! `MessageStore` is the only shared mutable resource in the service. Both
//! implementations return the most recent messages ordered by `timestamp`
//! descending, breaking ties by `id` ascending.

use crate::error::AppResult;
use crate::models::Message;
use async_trait::async_trait;

pub mod memory;
pub mod postgres;

pub use memory::InMemoryMessageStore;
pub use postgres::PgMessageStore;

#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Insert or overwrite the record keyed by `message.id`
    async fn save(&self, message: Message) -> AppResult<Message>;

    /// Up to `limit` messages, newest first
    async fn list_recent(&self, limit: usize) -> AppResult<Vec<Message>>;

    /// Cheap probe used by the readiness endpoint
    async fn health_check(&self) -> AppResult<()>;
}
