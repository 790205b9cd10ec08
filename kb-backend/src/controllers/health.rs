//! Unauthenticated liveness probe with a snapshot of the store's size.

use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::AppState;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/health", web::get().to(health_check));
}

async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "accounts": state.store.account_count(),
        "queries": state.store.query_count(),
        "activeSessions": state.sessions.len(),
    }))
}
