//! Matching engine inputs and outputs.

use chrono::NaiveDate;
use serde::Serialize;

use super::vendor::{ServiceCategory, VendorProfile};

/// Search criteria for a vendor match run.
///
/// `location` is accepted for parity with the search form but is not
/// applied as a filter predicate.
#[derive(Debug, Clone)]
pub struct MatchCriteria {
    pub category: ServiceCategory,
    pub date: NaiveDate,
    pub max_budget: f64,
    pub location: Option<String>,
}

/// One ranked entry in a match result.
#[derive(Debug, Clone, Serialize)]
pub struct VendorMatch {
    pub score: f64,
    pub profile: VendorProfile,
}
