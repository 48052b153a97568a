//! HTTP route modules

pub mod github;

use crate::server::handlers::health_check;
use actix_web::web;

/// Register every route the gateway serves
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .configure(github::configure_routes);
}
