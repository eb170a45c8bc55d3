/// OpenAPI documentation for the Message Service
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Nova Message Service API",
        version = "1.0.0",
        description = "Post short text messages and read back the most recent ones, newest first.",
        license(
            name = "MIT"
        )
    ),
    paths(
        crate::handlers::messages::list_messages,
        crate::handlers::messages::create_message,
    ),
    components(schemas(crate::models::Message, crate::models::CreateMessageRequest)),
    tags(
        (name = "messages", description = "Message posting and retrieval"),
    ),
)]
pub struct ApiDoc;

impl ApiDoc {
    pub fn openapi_json_path() -> &'static str {
        "/api/openapi.json"
    }
}
