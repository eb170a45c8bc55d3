use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A posted message as stored and returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Message {
    /// Server-assigned identifier
    pub id: String,
    pub text: String,
    /// Client-supplied sort key (milliseconds since epoch)
    pub timestamp: i64,
}

/// Payload accepted by `POST /api/messages`
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateMessageRequest {
    /// Accepted for compatibility and always replaced by the server
    #[serde(default)]
    pub id: Option<String>,
    pub text: String,
    pub timestamp: i64,
}

impl CreateMessageRequest {
    /// Bind the request to a server-assigned id
    pub fn into_message(self, id: String) -> Message {
        Message {
            id,
            text: self.text,
            timestamp: self.timestamp,
        }
    }
}
