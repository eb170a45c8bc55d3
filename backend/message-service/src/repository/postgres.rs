use super::MessageStore;
use crate::error::AppResult;
use crate::models::Message;
use async_trait::async_trait;
use sqlx::migrate::Migrator;
use sqlx::PgPool;

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// PostgreSQL-backed store over the `messages` table
#[derive(Clone)]
pub struct PgMessageStore {
    pool: PgPool,
}

impl PgMessageStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply embedded migrations (idempotent)
    pub async fn migrate(&self) -> AppResult<()> {
        MIGRATOR.run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl MessageStore for PgMessageStore {
    async fn save(&self, message: Message) -> AppResult<Message> {
        let saved = sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (id, text, "timestamp")
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE
            SET text = EXCLUDED.text, "timestamp" = EXCLUDED."timestamp"
            RETURNING id, text, "timestamp"
            "#,
        )
        .bind(&message.id)
        .bind(&message.text)
        .bind(message.timestamp)
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }

    async fn list_recent(&self, limit: usize) -> AppResult<Vec<Message>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let messages = sqlx::query_as::<_, Message>(
            r#"
            SELECT id, text, "timestamp"
            FROM messages
            ORDER BY "timestamp" DESC, id ASC
            LIMIT $1
            "#,
        )
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }

    async fn health_check(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
