/// Message handlers - HTTP endpoints under `/api/messages`
use crate::error::{AppError, AppResult};
use crate::models::{CreateMessageRequest, Message};
use crate::services::MessageService;
use actix_web::{error::JsonPayloadError, web, HttpResponse};

/// List the most recent messages, newest first
#[utoipa::path(
    get,
    path = "/api/messages",
    tag = "messages",
    responses(
        (status = 200, description = "Most recent messages, newest first", body = Vec<Message>),
        (status = 503, description = "Message store unavailable")
    )
)]
pub async fn list_messages(service: web::Data<MessageService>) -> AppResult<HttpResponse> {
    let messages = service.list_recent().await?;
    Ok(HttpResponse::Ok().json(messages))
}

/// Create a message; the server assigns its id
#[utoipa::path(
    post,
    path = "/api/messages",
    tag = "messages",
    request_body = CreateMessageRequest,
    responses(
        (status = 201, description = "Message stored", body = Message),
        (status = 400, description = "Malformed payload"),
        (status = 413, description = "Payload exceeds the transport limit"),
        (status = 503, description = "Message store unavailable")
    )
)]
pub async fn create_message(
    service: web::Data<MessageService>,
    req: web::Json<CreateMessageRequest>,
) -> AppResult<HttpResponse> {
    let message = service.create(req.into_inner()).await?;
    Ok(HttpResponse::Created().json(message))
}

/// JSON extractor settings: oversized bodies map to 413, other decoding
/// failures to `AppError::BadRequest`. The size ceiling is actix's default.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        tracing::debug!(error = %err, "rejected message payload");
        match err {
            JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
                AppError::PayloadTooLarge(err.to_string()).into()
            }
            _ => AppError::BadRequest(err.to_string()).into(),
        }
    })
}
