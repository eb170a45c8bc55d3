use actix_web::{web, App, HttpResponse, HttpServer};
use db_pool::{create_pool, DbConfig};
use message_service::openapi::ApiDoc;
use message_service::repository::{InMemoryMessageStore, MessageStore, PgMessageStore};
use message_service::services::{MessageService, UuidIdGenerator};
use message_service::{config, cors, error::AppError, logging, routes};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

const SERVICE_NAME: &str = "message-service";

async fn build_store(cfg: &config::Config) -> Result<Arc<dyn MessageStore>, AppError> {
    let Some(database_url) = cfg.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set; messages are kept in memory only");
        return Ok(Arc::new(InMemoryMessageStore::new()));
    };

    let db_cfg = DbConfig::with_url(SERVICE_NAME, database_url)
        .map_err(|e| AppError::Config(e.to_string()))?;
    db_cfg.log_config();

    let pool = create_pool(db_cfg)
        .await
        .map_err(|e| AppError::StartServer(format!("db: {e}")))?;

    let store = PgMessageStore::new(pool);
    store
        .migrate()
        .await
        .map_err(|e| AppError::StartServer(format!("database migrations failed: {e}")))?;
    tracing::info!("Connected to PostgreSQL message store");

    Ok(Arc::new(store))
}

/// `message-service healthcheck` probes the local HTTP port for container health checks
async fn run_healthcheck() -> Result<(), AppError> {
    let url = format!("http://127.0.0.1:{}/health", config::healthcheck_port());
    match reqwest::Client::new().get(&url).send().await {
        Ok(resp) if resp.status().is_success() => Ok(()),
        Ok(resp) => Err(AppError::StartServer(format!(
            "healthcheck HTTP status: {}",
            resp.status()
        ))),
        Err(e) => Err(AppError::StartServer(format!("healthcheck HTTP error: {e}"))),
    }
}

async fn openapi_json(doc: web::Data<utoipa::openapi::OpenApi>) -> HttpResponse {
    HttpResponse::Ok().json(doc.get_ref())
}

#[actix_web::main]
async fn main() -> Result<(), AppError> {
    if std::env::args().nth(1).as_deref() == Some("healthcheck") {
        return run_healthcheck().await;
    }

    logging::init_tracing();
    let cfg = config::Config::from_env()?;

    tracing::info!("Starting {} v{}", SERVICE_NAME, env!("CARGO_PKG_VERSION"));
    tracing::info!(
        profiles = ?cfg.app.profiles,
        page_size = cfg.messages.page_size,
        cors = cfg.cors_enabled(),
        "configuration loaded"
    );

    let store = build_store(&cfg).await?;
    let service = web::Data::new(MessageService::new(
        store,
        Arc::new(UuidIdGenerator),
        cfg.messages.page_size,
    ));

    let bind_addr = cfg.bind_address();
    tracing::info!(%bind_addr, "starting HTTP server");

    let openapi_doc = web::Data::new(ApiDoc::openapi());

    HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .app_data(openapi_doc.clone())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url(ApiDoc::openapi_json_path(), openapi_doc.get_ref().clone()),
            )
            .route(ApiDoc::openapi_json_path(), web::get().to(openapi_json))
            .configure(routes::configure_routes)
            .wrap(cors::middleware(&cfg))
            .wrap(tracing_actix_web::TracingLogger::default())
    })
    .bind(&bind_addr)
    .map_err(|e| AppError::StartServer(format!("bind {bind_addr}: {e}")))?
    .run()
    .await
    .map_err(|e| AppError::StartServer(e.to_string()))?;

    tracing::info!("{} stopped", SERVICE_NAME);
    Ok(())
}
