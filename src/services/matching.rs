//! Vendor matching and scoring engine
//!
//! Pure computation over candidate profiles fetched from the store:
//! eligibility filtering, performance scoring, and a stable descending
//! sort. Runs read-only with no shared-state hazard, so independent
//! match requests can execute fully in parallel.

use std::cmp::Ordering;

use crate::domain::{MatchCriteria, VendorMatch, VendorProfile};
use crate::domain::vendor::PerformanceMetrics;

/// Weight on the 0–5 average rating.
const RATING_WEIGHT: f64 = 0.4;
/// Weight on the 0–100 completion rate. The domains are intentionally
/// not normalized to a common scale, so this term dominates the score.
const COMPLETION_WEIGHT: f64 = 0.3;
/// Weight on the inverse-decay response-time term, bounded in (0, 0.3].
const RESPONSE_WEIGHT: f64 = 0.3;

/// A vendor is eligible iff all three hold:
/// - the requested category is in its category set (exact membership),
/// - its schedule holds an explicit `available` entry for the requested
///   calendar date,
/// - at least one of its services is priced within the budget. Any
///   service qualifies; the price check is independent of the category
///   check.
pub fn is_eligible(profile: &VendorProfile, criteria: &MatchCriteria) -> bool {
    profile.categories.contains(&criteria.category)
        && profile.availability.is_available_on(criteria.date)
        && profile
            .services
            .iter()
            .any(|service| service.price <= criteria.max_budget)
}

/// Weighted desirability score:
///
/// `rating * 0.4 + completion_rate * 0.3 + (1 / (response_time + 1)) * 0.3`
///
/// The `+1` denominator keeps the response term defined at zero minutes.
/// Non-finite inputs count as 0; the function never fails.
pub fn performance_score(performance: &PerformanceMetrics) -> f64 {
    let rating = finite_or_zero(performance.average_rating);
    let completion_rate = finite_or_zero(performance.completion_rate);
    let response_time = finite_or_zero(performance.response_time);

    rating * RATING_WEIGHT
        + completion_rate * COMPLETION_WEIGHT
        + (1.0 / (response_time + 1.0)) * RESPONSE_WEIGHT
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Filter `candidates` against `criteria`, score the eligible set, and
/// return it ordered by score descending. The sort is stable: vendors
/// with equal scores keep the candidate enumeration order.
pub fn rank(candidates: Vec<VendorProfile>, criteria: &MatchCriteria) -> Vec<VendorMatch> {
    let mut matches: Vec<VendorMatch> = candidates
        .into_iter()
        .filter(|profile| is_eligible(profile, criteria))
        .map(|profile| VendorMatch {
            score: performance_score(&profile.performance),
            profile,
        })
        .collect();

    matches.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    matches
}
