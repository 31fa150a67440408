//! Vendor matching route

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;

use crate::api::response::DataResponse;
use crate::app::AppState;
use crate::auth::RequireAuth;
use crate::domain::availability::date_only;
use crate::domain::vendor::ServiceCategory;
use crate::domain::MatchCriteria;
use crate::error::ApiError;
use crate::services::matching;

#[derive(Debug, Deserialize)]
pub struct MatchQuery {
    pub category: ServiceCategory,
    #[serde(deserialize_with = "date_only::deserialize")]
    pub date: NaiveDate,
    pub budget: f64,
    /// Accepted for parity with the search form; not a filter predicate.
    #[serde(default)]
    pub location: Option<String>,
}

/// GET /api/vendor/match?category&date&budget&location
///
/// Run the matching engine for an event: fetch candidates in the
/// requested category, filter for eligibility, score, and return the
/// full eligible set ordered by score descending. An empty list is a
/// normal zero-result outcome, not an error.
pub async fn match_vendors(
    State(state): State<Arc<AppState>>,
    auth: RequireAuth,
    Query(query): Query<MatchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let criteria = MatchCriteria {
        category: query.category,
        date: query.date,
        max_budget: query.budget,
        location: query.location,
    };

    let candidates = state
        .store
        .candidates_in_category(criteria.category)
        .await?;

    let matches = matching::rank(candidates, &criteria);

    tracing::debug!(
        caller = %auth.user_id,
        category = %criteria.category,
        date = %criteria.date,
        matched = matches.len(),
        "Vendor match computed"
    );

    Ok(Json(DataResponse::new(matches)))
}
