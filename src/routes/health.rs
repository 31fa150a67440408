use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub services: ServiceHealth,
}

#[derive(Serialize)]
pub struct ServiceHealth {
    pub store: String,
    pub cache: String,
}

/// Health check endpoint - public
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<HealthResponse>) {
    let store_ok = state.store.ping().await.is_ok();

    let cache_status = match &state.cache {
        Some(cache) => {
            if cache.health_check().await.is_ok() {
                "ok"
            } else {
                "error"
            }
        }
        None => "disabled",
    };

    // The store is critical; the cache only degrades.
    let status = if store_ok {
        if cache_status == "error" {
            "degraded"
        } else {
            "healthy"
        }
    } else {
        "unhealthy"
    };

    let status_code = if store_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            services: ServiceHealth {
                store: if store_ok { "ok" } else { "error" }.to_string(),
                cache: cache_status.to_string(),
            },
        }),
    )
}
