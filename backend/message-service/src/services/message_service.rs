/// Message service - creates messages and lists the most recent ones
use crate::error::AppResult;
use crate::metrics::{MESSAGES_CREATED_TOTAL, MESSAGES_LIST_REQUESTS_TOTAL, MESSAGE_STORE_ERRORS_TOTAL};
use crate::models::{CreateMessageRequest, Message};
use crate::repository::MessageStore;
use crate::services::IdGenerator;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Clone)]
pub struct MessageService {
    store: Arc<dyn MessageStore>,
    ids: Arc<dyn IdGenerator>,
    page_size: usize,
}

impl MessageService {
    pub fn new(store: Arc<dyn MessageStore>, ids: Arc<dyn IdGenerator>, page_size: usize) -> Self {
        Self {
            store,
            ids,
            page_size,
        }
    }

    /// The newest `page_size` messages, ordered by timestamp descending
    pub async fn list_recent(&self) -> AppResult<Vec<Message>> {
        MESSAGES_LIST_REQUESTS_TOTAL.inc();

        let messages = self
            .store
            .list_recent(self.page_size)
            .await
            .map_err(|e| {
                MESSAGE_STORE_ERRORS_TOTAL.with_label_values(&["list"]).inc();
                e
            })?;

        debug!(count = messages.len(), limit = self.page_size, "listed recent messages");
        Ok(messages)
    }

    /// Assign a fresh id to the request and persist it
    pub async fn create(&self, request: CreateMessageRequest) -> AppResult<Message> {
        if let Some(client_id) = request.id.as_deref() {
            debug!(client_id, "discarding client-supplied message id");
        }

        let message = request.into_message(self.ids.next_id());
        let saved = self
            .store
            .save(message)
            .await
            .map_err(|e| {
                MESSAGE_STORE_ERRORS_TOTAL.with_label_values(&["save"]).inc();
                e
            })?;

        MESSAGES_CREATED_TOTAL.inc();
        info!(message_id = %saved.id, timestamp = saved.timestamp, "message created");
        Ok(saved)
    }

    pub async fn health_check(&self) -> AppResult<()> {
        self.store.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::repository::InMemoryMessageStore;
    use crate::services::UuidIdGenerator;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct SequentialIds(AtomicUsize);

    impl IdGenerator for SequentialIds {
        fn next_id(&self) -> String {
            format!("msg-{}", self.0.fetch_add(1, Ordering::SeqCst))
        }
    }

    struct UnavailableStore;

    #[async_trait]
    impl MessageStore for UnavailableStore {
        async fn save(&self, _message: Message) -> AppResult<Message> {
            Err(AppError::StorageUnavailable("connection refused".into()))
        }

        async fn list_recent(&self, _limit: usize) -> AppResult<Vec<Message>> {
            Err(AppError::StorageUnavailable("connection refused".into()))
        }

        async fn health_check(&self) -> AppResult<()> {
            Err(AppError::StorageUnavailable("connection refused".into()))
        }
    }

    fn request(text: &str, timestamp: i64) -> CreateMessageRequest {
        CreateMessageRequest {
            id: None,
            text: text.to_string(),
            timestamp,
        }
    }

    fn service(page_size: usize) -> MessageService {
        MessageService::new(
            Arc::new(InMemoryMessageStore::new()),
            Arc::new(SequentialIds(AtomicUsize::new(0))),
            page_size,
        )
    }

    #[tokio::test]
    async fn create_overwrites_client_id() {
        let svc = MessageService::new(
            Arc::new(InMemoryMessageStore::new()),
            Arc::new(UuidIdGenerator),
            10,
        );
        let mut req = request("hello", 100);
        req.id = Some("client-id".into());

        let created = svc.create(req).await.unwrap();
        assert!(!created.id.is_empty());
        assert_ne!(created.id, "client-id");
        assert_eq!(created.text, "hello");
        assert_eq!(created.timestamp, 100);
    }

    #[tokio::test]
    async fn list_is_capped_at_page_size() {
        let svc = service(10);
        for ts in 1..=15 {
            svc.create(request(&format!("m{ts}"), ts)).await.unwrap();
        }

        let page = svc.list_recent().await.unwrap();
        let stamps: Vec<i64> = page.iter().map(|m| m.timestamp).collect();
        assert_eq!(stamps, (6..=15).rev().collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn list_round_trips_created_messages() {
        let svc = service(10);
        let hello = svc.create(request("hello", 100)).await.unwrap();
        let world = svc.create(request("world", 200)).await.unwrap();

        let first = svc.list_recent().await.unwrap();
        assert_eq!(first, vec![world, hello]);
        assert_eq!(svc.list_recent().await.unwrap(), first);
    }

    #[tokio::test]
    async fn store_failures_propagate() {
        let svc = MessageService::new(Arc::new(UnavailableStore), Arc::new(UuidIdGenerator), 10);

        assert!(matches!(
            svc.list_recent().await,
            Err(AppError::StorageUnavailable(_))
        ));
        assert!(matches!(
            svc.create(request("x", 1)).await,
            Err(AppError::StorageUnavailable(_))
        ));
        assert!(svc.health_check().await.is_err());
    }
}
