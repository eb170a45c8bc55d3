use super::MessageStore;
use crate::error::AppResult;
use crate::models::Message;
use async_trait::async_trait;
use std::cmp::Reverse;
use std::collections::{BTreeSet, HashMap};
use tokio::sync::RwLock;

/// Position in the listing order: newest first, then id ascending
type RecencyKey = (Reverse<i64>, String);

/// Process-local store, used when no database is configured
#[derive(Debug, Default)]
pub struct InMemoryMessageStore {
    inner: RwLock<Inner>,
}

/// `recency` holds exactly one key per entry in `by_id`
#[derive(Debug, Default)]
struct Inner {
    by_id: HashMap<String, Message>,
    recency: BTreeSet<RecencyKey>,
}

impl InMemoryMessageStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn save(&self, message: Message) -> AppResult<Message> {
        let mut inner = self.inner.write().await;
        if let Some(previous) = inner.by_id.insert(message.id.clone(), message.clone()) {
            inner
                .recency
                .remove(&(Reverse(previous.timestamp), previous.id));
        }
        inner
            .recency
            .insert((Reverse(message.timestamp), message.id.clone()));
        Ok(message)
    }

    async fn list_recent(&self, limit: usize) -> AppResult<Vec<Message>> {
        let inner = self.inner.read().await;
        Ok(inner
            .recency
            .iter()
            .take(limit)
            .filter_map(|(_, id)| inner.by_id.get(id).cloned())
            .collect())
    }

    async fn health_check(&self) -> AppResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn msg(id: &str, timestamp: i64) -> Message {
        Message {
            id: id.to_string(),
            text: format!("text-{id}"),
            timestamp,
        }
    }

    #[tokio::test]
    async fn empty_store_lists_nothing() {
        let store = InMemoryMessageStore::new();
        assert!(store.list_recent(10).await.unwrap().is_empty());
        assert!(store.inner.read().await.by_id.is_empty());
    }

    #[tokio::test]
    async fn lists_newest_first_and_caps_at_limit() {
        let store = InMemoryMessageStore::new();
        for (i, ts) in [30, 10, 50, 20, 40].into_iter().enumerate() {
            store.save(msg(&format!("m{i}"), ts)).await.unwrap();
        }

        let recent = store.list_recent(3).await.unwrap();
        let stamps: Vec<i64> = recent.iter().map(|m| m.timestamp).collect();
        assert_eq!(stamps, vec![50, 40, 30]);

        assert_eq!(store.list_recent(100).await.unwrap().len(), 5);
        assert!(store.list_recent(0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn equal_timestamps_order_by_id() {
        let store = InMemoryMessageStore::new();
        store.save(msg("b", 7)).await.unwrap();
        store.save(msg("c", 7)).await.unwrap();
        store.save(msg("a", 7)).await.unwrap();

        let ids: Vec<String> = store
            .list_recent(10)
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn save_overwrites_same_id() {
        let store = InMemoryMessageStore::new();
        store.save(msg("same", 1)).await.unwrap();
        let mut updated = msg("same", 2);
        updated.text = "second".into();
        store.save(updated.clone()).await.unwrap();

        assert_eq!(store.inner.read().await.by_id.len(), 1);
        assert_eq!(store.list_recent(10).await.unwrap(), vec![updated]);
    }

    #[tokio::test]
    async fn overwrite_with_new_timestamp_moves_entry() {
        let store = InMemoryMessageStore::new();
        store.save(msg("a", 10)).await.unwrap();
        store.save(msg("b", 20)).await.unwrap();
        store.save(msg("c", 30)).await.unwrap();

        store.save(msg("a", 40)).await.unwrap();
        store.save(msg("c", 5)).await.unwrap();

        let page: Vec<(String, i64)> = store
            .list_recent(10)
            .await
            .unwrap()
            .into_iter()
            .map(|m| (m.id, m.timestamp))
            .collect();
        assert_eq!(
            page,
            vec![("a".to_string(), 40), ("b".to_string(), 20), ("c".to_string(), 5)]
        );
        let inner = store.inner.read().await;
        assert_eq!(inner.by_id.len(), 3);
        assert_eq!(inner.recency.len(), 3);
    }

    #[tokio::test]
    async fn concurrent_writers_and_readers() {
        let store = Arc::new(InMemoryMessageStore::new());
        let mut tasks = Vec::new();
        for i in 0..50i64 {
            let store = store.clone();
            tasks.push(tokio::spawn(async move {
                store.save(msg(&format!("id-{i:02}"), i)).await.unwrap();
                let page = store.list_recent(10).await.unwrap();
                assert!(page.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        let page = store.list_recent(10).await.unwrap();
        let stamps: Vec<i64> = page.iter().map(|m| m.timestamp).collect();
        assert_eq!(stamps, (40..50).rev().collect::<Vec<_>>());
    }
}
