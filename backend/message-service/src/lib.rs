/// Message Service Library
///
/// A small message board: clients post `{text, timestamp}` messages and read
/// back the most recent ones, newest first.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers
/// - `models`: wire and storage types
/// - `services`: id generation and message business logic
/// - `repository`: `MessageStore` trait with PostgreSQL and in-memory backends
/// - `cors`: profile-dependent cross-origin policy
/// - `config`: configuration management
/// - `metrics`: Prometheus collectors
pub mod config;
pub mod cors;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod openapi;
pub mod repository;
pub mod routes;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};
