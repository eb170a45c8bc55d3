//! Cross-origin policy
//!
//! Outside the `cloud` profile every origin, method and header is allowed on
//! every path. In `cloud` no CORS middleware is installed and the platform in
//! front of the service owns the policy.

use crate::config::Config;
use actix_cors::Cors;
use actix_web::middleware::Condition;

pub fn permissive() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600)
}

/// Wrap-ready CORS middleware, active only when `config.cors_enabled()`
pub fn middleware(config: &Config) -> Condition<Cors> {
    Condition::new(config.cors_enabled(), permissive())
}
