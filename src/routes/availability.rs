//! Availability ledger routes

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::response::DataResponse;
use crate::app::AppState;
use crate::auth::RequireAuth;
use crate::domain::availability::{date_only, SlotStatus};
use crate::error::ApiError;
use crate::services::cache::keys as cache_keys;

#[derive(Debug, Deserialize)]
pub struct AvailabilityRangeQuery {
    #[serde(deserialize_with = "date_only::deserialize")]
    pub start_date: NaiveDate,
    #[serde(deserialize_with = "date_only::deserialize")]
    pub end_date: NaiveDate,
}

/// GET /api/vendor/availability?start_date&end_date
///
/// The caller's schedule entries within the inclusive date range, in
/// stored order. An inverted range yields an empty list.
pub async fn get_availability(
    State(state): State<Arc<AppState>>,
    auth: RequireAuth,
    Query(range): Query<AvailabilityRangeQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let profile = state
        .store
        .find(auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Profile not found".to_string()))?;

    let slots = profile
        .availability
        .slots_in_range(range.start_date, range.end_date);

    Ok(Json(DataResponse::new(slots)))
}

#[derive(Debug, Deserialize)]
pub struct SetSlotRequest {
    #[serde(deserialize_with = "date_only::deserialize")]
    pub date: NaiveDate,
    pub status: SlotStatus,
    #[serde(default)]
    pub event_id: Option<Uuid>,
}

/// POST /api/vendor/availability
///
/// Record or update the status for a single date in the caller's
/// availability ledger. Applied as one atomic read-modify-write against
/// the profile document; repeating the call with identical arguments
/// leaves a single entry for the date.
pub async fn set_availability(
    State(state): State<Arc<AppState>>,
    auth: RequireAuth,
    Json(req): Json<SetSlotRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let availability = state
        .store
        .set_slot(auth.user_id, req.date, req.status, req.event_id)
        .await?;

    if let Some(cache) = &state.cache {
        let _ = cache.delete(&cache_keys::vendor_profile(auth.user_id)).await;
    }

    Ok(Json(DataResponse::new(availability)))
}
