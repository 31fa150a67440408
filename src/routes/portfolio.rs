//! Portfolio routes
//!
//! Public portfolio lookup plus authenticated item submission.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::api::response::DataResponse;
use crate::app::AppState;
use crate::auth::RequireAuth;
use crate::domain::vendor::{AddPortfolioItemRequest, PortfolioItem};
use crate::error::ApiError;
use crate::services::cache::keys as cache_keys;

/// GET /api/vendor/portfolio/:vendor_id
///
/// A vendor's portfolio. Public: prospective clients browse this
/// without an account.
pub async fn get_portfolio(
    State(state): State<Arc<AppState>>,
    Path(vendor_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let profile = state
        .store
        .find(vendor_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Profile not found".to_string()))?;

    Ok(Json(DataResponse::new(profile.portfolio)))
}

/// POST /api/vendor/portfolio
///
/// Append an image or video entry to the caller's portfolio.
pub async fn add_portfolio_item(
    State(state): State<Arc<AppState>>,
    auth: RequireAuth,
    Json(req): Json<AddPortfolioItemRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let item = PortfolioItem {
        url: req.url,
        caption: req.caption,
        category: req.category,
    };

    let portfolio = state
        .store
        .add_portfolio_item(auth.user_id, req.kind, item)
        .await?;

    if let Some(cache) = &state.cache {
        let _ = cache.delete(&cache_keys::vendor_profile(auth.user_id)).await;
    }

    Ok(Json(DataResponse::new(portfolio)))
}
