//! Vendor profile routes
//!
//! Profile fetch (with create-on-first-fetch defaults), replace-or-create
//! upsert, and the performance block. Profile reads go through the Redis
//! cache when one is configured.

use axum::{extract::State, response::IntoResponse, Json};
use chrono::Utc;
use std::sync::Arc;

use crate::api::response::DataResponse;
use crate::app::AppState;
use crate::auth::RequireAuth;
use crate::domain::vendor::UpsertProfileRequest;
use crate::domain::VendorProfile;
use crate::error::ApiError;
use crate::services::cache::keys as cache_keys;

/// GET /api/vendor/profile
///
/// Get the caller's vendor profile, creating a default stub on first
/// fetch. Uses the Redis cache when available.
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    auth: RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let cache_key = cache_keys::vendor_profile(auth.user_id);

    if let Some(cache) = &state.cache {
        if let Some(cached) = cache.get::<VendorProfile>(&cache_key).await {
            tracing::debug!(vendor_id = %auth.user_id, "Profile cache hit");
            return Ok(Json(DataResponse::new(cached)));
        }
    }

    let profile = match state.store.find(auth.user_id).await? {
        Some(profile) => profile,
        None => {
            // First fetch: persist the default stub so later reads and
            // availability mutations see a profile record.
            let stub = VendorProfile::default_stub(auth.user_id, Utc::now());
            state.store.upsert(stub).await?
        }
    };

    if let Some(cache) = &state.cache {
        let _ = cache.set(&cache_key, &profile).await;
    }

    Ok(Json(DataResponse::new(profile)))
}

/// POST /api/vendor/profile
///
/// Create or update the caller's vendor profile. Validation runs before
/// any store access. The performance block is never writable here; it
/// belongs to the event-completion and review subsystems.
pub async fn upsert_profile(
    State(state): State<Arc<AppState>>,
    auth: RequireAuth,
    Json(req): Json<UpsertProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate().map_err(ApiError::Validation)?;

    let existing = state.store.find(auth.user_id).await?;
    let now = Utc::now();

    let profile = match existing {
        Some(current) => VendorProfile {
            vendor_id: auth.user_id,
            business_name: req.business_name,
            description: req.description,
            categories: req.categories,
            services: req.services.unwrap_or(current.services),
            availability: req.availability.unwrap_or(current.availability),
            portfolio: req.portfolio.unwrap_or(current.portfolio),
            location: req.location.unwrap_or(current.location),
            contact: req.contact.unwrap_or(current.contact),
            documents: req.documents.unwrap_or(current.documents),
            performance: current.performance,
            created_at: current.created_at,
            updated_at: current.updated_at,
        },
        None => VendorProfile {
            vendor_id: auth.user_id,
            business_name: req.business_name,
            description: req.description,
            categories: req.categories,
            services: req.services.unwrap_or_default(),
            availability: req.availability.unwrap_or_default(),
            portfolio: req.portfolio.unwrap_or_default(),
            location: req.location.unwrap_or_default(),
            contact: req.contact.unwrap_or_default(),
            documents: req.documents.unwrap_or_default(),
            performance: Default::default(),
            created_at: now,
            updated_at: now,
        },
    };

    let saved = state.store.upsert(profile).await?;

    if let Some(cache) = &state.cache {
        let cache_key = cache_keys::vendor_profile(auth.user_id);
        let _ = cache.delete(&cache_key).await;
        let _ = cache.set(&cache_key, &saved).await;
    }

    Ok(Json(DataResponse::new(saved)))
}

/// GET /api/vendor/performance
///
/// Get the caller's performance metrics block.
pub async fn get_performance(
    State(state): State<Arc<AppState>>,
    auth: RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let profile = state
        .store
        .find(auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Profile not found".to_string()))?;

    Ok(Json(DataResponse::new(profile.performance)))
}
