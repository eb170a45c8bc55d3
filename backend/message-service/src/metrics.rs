//! Prometheus metrics for message-service.
//!
//! Exposes message counters and an HTTP handler for the `/metrics` endpoint.

use actix_web::HttpResponse;
use lazy_static::lazy_static;
use prometheus::{
    register_int_counter, register_int_counter_vec, Encoder, IntCounter, IntCounterVec,
    TextEncoder,
};

lazy_static! {
    /// Messages accepted by the create endpoint.
    pub static ref MESSAGES_CREATED_TOTAL: IntCounter = register_int_counter!(
        "messages_created_total",
        "Total messages created"
    )
    .expect("failed to register messages_created_total");

    /// List requests served.
    pub static ref MESSAGES_LIST_REQUESTS_TOTAL: IntCounter = register_int_counter!(
        "messages_list_requests_total",
        "Total recent-message list requests"
    )
    .expect("failed to register messages_list_requests_total");

    /// Store failures by operation (save/list).
    pub static ref MESSAGE_STORE_ERRORS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "message_store_errors_total",
        "Message store failures segmented by operation",
        &["operation"]
    )
    .expect("failed to register message_store_errors_total");
}

/// Actix handler that renders Prometheus metrics in text format.
pub async fn serve_metrics() -> HttpResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    if let Err(err) = encoder.encode(&metric_families, &mut buffer) {
        return HttpResponse::InternalServerError().body(err.to_string());
    }

    HttpResponse::Ok()
        .content_type(encoder.format_type())
        .body(buffer)
}
