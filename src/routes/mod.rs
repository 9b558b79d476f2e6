// Route exports
pub mod auth;
pub mod errors;
pub mod likes;
pub mod matches;
pub mod projects;
pub mod users;

use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;

use crate::models::HealthResponse;
use crate::services::Store;
use auth::JwtVerifier;

/// Application state shared across all handlers
///
/// Holds only the store handle and the token verifier; no per-user state
/// lives in the process.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub verifier: Arc<JwtVerifier>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, verifier: JwtVerifier) -> Self {
        Self {
            store,
            verifier: Arc::new(verifier),
        }
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/health", web::get().to(health_check))
            .configure(users::configure)
            .configure(projects::configure)
            .configure(likes::configure)
            .configure(matches::configure),
    );
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let db_healthy = match state.store.health_check().await {
        Ok(healthy) => healthy,
        Err(e) => {
            tracing::warn!("Database health check failed: {}", e);
            false
        }
    };

    let (status, database) = if db_healthy {
        ("healthy", "connected")
    } else {
        ("degraded", "unavailable")
    };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        database: database.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}
