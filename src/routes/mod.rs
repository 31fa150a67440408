pub mod availability;
pub mod health;
pub mod matching;
pub mod portfolio;
pub mod profiles;

use axum::{routing::get, routing::post, Router};
use std::sync::Arc;

use crate::app::AppState;

/// Build the API router with all routes
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        // Public routes
        .route("/health", get(health::health_check))
        .route(
            "/api/vendor/portfolio/:vendor_id",
            get(portfolio::get_portfolio),
        )
        // Vendor profile
        .route("/api/vendor/profile", get(profiles::get_profile))
        .route("/api/vendor/profile", post(profiles::upsert_profile))
        .route("/api/vendor/performance", get(profiles::get_performance))
        // Availability ledger
        .route(
            "/api/vendor/availability",
            get(availability::get_availability),
        )
        .route(
            "/api/vendor/availability",
            post(availability::set_availability),
        )
        // Portfolio
        .route("/api/vendor/portfolio", post(portfolio::add_portfolio_item))
        // Matching engine
        .route("/api/vendor/match", get(matching::match_vendors))
}
