use crate::handlers;
use crate::metrics;
use actix_web::web;

/// Register message, health and metrics routes.
///
/// Expects a `web::Data<MessageService>` to be registered on the app.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(handlers::json_config())
        .route("/metrics", web::get().to(metrics::serve_metrics))
        .route("/health", web::get().to(handlers::health_summary))
        .route("/health/ready", web::get().to(handlers::readiness_check))
        .route("/health/live", web::get().to(handlers::liveness_check))
        .service(
            web::resource("/api/messages")
                .route(web::get().to(handlers::list_messages))
                .route(web::post().to(handlers::create_message)),
        );
}
