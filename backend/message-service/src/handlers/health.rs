use crate::services::MessageService;
use actix_web::{web, HttpResponse};
use chrono::Utc;

pub async fn health_summary() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "service": "message-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub async fn readiness_check(service: web::Data<MessageService>) -> HttpResponse {
    match service.health_check().await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "ready": true,
            "timestamp": Utc::now().to_rfc3339(),
        })),
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "ready": false,
                "error": e.to_string(),
                "timestamp": Utc::now().to_rfc3339(),
            }))
        }
    }
}

pub async fn liveness_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({"alive": true}))
}
