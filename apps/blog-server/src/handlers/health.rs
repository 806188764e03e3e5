//! Health check endpoint.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub environment: String,
    pub storage: &'static str,
    pub timestamp: String,
}

/// Server status, including whether the configured database answers.
///
/// GET /api/health
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let (storage, reachable) = storage_status(&state).await;

    let response = HealthResponse {
        status: if reachable { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        environment: state.environment.to_string(),
        storage,
        timestamp: state.clock.now().to_rfc3339(),
    };

    if reachable {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

#[cfg(feature = "postgres")]
async fn storage_status(state: &AppState) -> (&'static str, bool) {
    match &state.db {
        Some(db) => match db.ping().await {
            Ok(()) => ("postgres", true),
            Err(e) => {
                tracing::warn!("Database ping failed: {}", e);
                ("postgres", false)
            }
        },
        None => ("memory", true),
    }
}

#[cfg(not(feature = "postgres"))]
async fn storage_status(_state: &AppState) -> (&'static str, bool) {
    ("memory", true)
}
