//! Vendor profile aggregate
//!
//! One document per vendor identity, with the embedded services,
//! portfolio, schedule, and performance records as owned value types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::availability::Availability;

/// Service categories a vendor can operate in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ServiceCategory {
    Catering,
    Photography,
    Decoration,
    Music,
    Makeup,
    Venue,
    #[default]
    Other,
}

impl ServiceCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Catering => "Catering",
            Self::Photography => "Photography",
            Self::Decoration => "Decoration",
            Self::Music => "Music",
            Self::Makeup => "Makeup",
            Self::Venue => "Venue",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single service a vendor offers. The category here is free text on
/// the service entry, independent of the profile-level category set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceOffering {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Performance metrics, mutated by the event-completion and review
/// subsystems and read-only here. Malformed or missing numeric fields
/// deserialize to 0 so a damaged document can still be scored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PerformanceMetrics {
    #[serde(default)]
    pub total_events: u32,
    #[serde(default, deserialize_with = "lenient_metric")]
    pub average_rating: f64,
    /// Minutes to first response.
    #[serde(default, deserialize_with = "lenient_metric")]
    pub response_time: f64,
    /// Percentage of accepted events completed, 0–100.
    #[serde(default, deserialize_with = "lenient_metric")]
    pub completion_rate: f64,
    #[serde(default, deserialize_with = "lenient_metric")]
    pub revenue: f64,
}

/// Accept any JSON value for a metric field, falling back to 0 for
/// anything that is not a finite number.
fn lenient_metric<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_f64().filter(|v| v.is_finite()).unwrap_or(0.0))
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Location {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SocialMedia {
    #[serde(default)]
    pub facebook: Option<String>,
    #[serde(default)]
    pub instagram: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ContactInfo {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub social_media: SocialMedia,
}

/// Business verification document reference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VerificationDocument {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    #[serde(default)]
    pub verified: bool,
}

/// A portfolio image or video entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortfolioItem {
    pub url: String,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Client testimonial, display data only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Testimonial {
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub event_type: Option<String>,
    /// 1–5 stars.
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub review: Option<String>,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Portfolio {
    #[serde(default)]
    pub images: Vec<PortfolioItem>,
    #[serde(default)]
    pub videos: Vec<PortfolioItem>,
    #[serde(default)]
    pub testimonials: Vec<Testimonial>,
}

/// The vendor profile document. One per vendor account, keyed by the
/// vendor's user id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VendorProfile {
    pub vendor_id: Uuid,
    pub business_name: String,
    pub description: String,
    pub categories: Vec<ServiceCategory>,
    #[serde(default)]
    pub services: Vec<ServiceOffering>,
    #[serde(default)]
    pub availability: Availability,
    #[serde(default)]
    pub performance: PerformanceMetrics,
    #[serde(default)]
    pub location: Location,
    #[serde(default)]
    pub contact: ContactInfo,
    #[serde(default)]
    pub documents: Vec<VerificationDocument>,
    #[serde(default)]
    pub portfolio: Portfolio,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl VendorProfile {
    /// Default stub created on first profile fetch.
    pub fn default_stub(vendor_id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            vendor_id,
            business_name: "My Business".to_string(),
            description: "Welcome to my vendor profile!".to_string(),
            categories: vec![ServiceCategory::Other],
            services: Vec::new(),
            availability: Availability::default(),
            performance: PerformanceMetrics::default(),
            location: Location::default(),
            contact: ContactInfo::default(),
            documents: Vec::new(),
            portfolio: Portfolio::default(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Request DTO for the replace-or-create profile upsert.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertProfileRequest {
    #[serde(default)]
    pub business_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub categories: Vec<ServiceCategory>,
    #[serde(default)]
    pub services: Option<Vec<ServiceOffering>>,
    #[serde(default)]
    pub availability: Option<Availability>,
    #[serde(default)]
    pub portfolio: Option<Portfolio>,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub contact: Option<ContactInfo>,
    #[serde(default)]
    pub documents: Option<Vec<VerificationDocument>>,
}

impl UpsertProfileRequest {
    /// Field checks that run before any store access.
    pub fn validate(&self) -> Result<(), String> {
        if self.business_name.trim().is_empty() {
            return Err("Business name is required".to_string());
        }
        if self.description.trim().is_empty() {
            return Err("Description is required".to_string());
        }
        if self.categories.is_empty() {
            return Err("At least one category is required".to_string());
        }
        Ok(())
    }
}

/// Kind discriminator for portfolio submissions.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PortfolioItemKind {
    Image,
    Video,
}

/// Request DTO for appending a portfolio item.
#[derive(Debug, Clone, Deserialize)]
pub struct AddPortfolioItemRequest {
    #[serde(rename = "type")]
    pub kind: PortfolioItemKind,
    pub url: String,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_stub_matches_first_fetch_contract() {
        let vendor_id = Uuid::new_v4();
        let now = Utc::now();
        let stub = VendorProfile::default_stub(vendor_id, now);

        assert_eq!(stub.business_name, "My Business");
        assert_eq!(stub.categories, vec![ServiceCategory::Other]);
        assert!(stub.services.is_empty());
        assert!(stub.availability.schedule.is_empty());
        assert_eq!(stub.availability.working_hours.start, "09:00");
        assert_eq!(stub.availability.working_hours.end, "17:00");
        assert_eq!(stub.availability.advance_booking_days, 30);
        assert_eq!(stub.performance.total_events, 0);
    }

    #[test]
    fn malformed_performance_fields_deserialize_to_zero() {
        let performance: PerformanceMetrics = serde_json::from_str(
            r#"{"total_events": 3, "average_rating": "broken", "response_time": null, "completion_rate": 88.5}"#,
        )
        .expect("lenient deserialization");

        assert_eq!(performance.total_events, 3);
        assert_eq!(performance.average_rating, 0.0);
        assert_eq!(performance.response_time, 0.0);
        assert_eq!(performance.completion_rate, 88.5);
        assert_eq!(performance.revenue, 0.0);
    }

    #[test]
    fn upsert_validation_rejects_each_missing_field() {
        let valid = UpsertProfileRequest {
            business_name: "Golden Hour Photos".to_string(),
            description: "Wedding photography".to_string(),
            categories: vec![ServiceCategory::Photography],
            services: None,
            availability: None,
            portfolio: None,
            location: None,
            contact: None,
            documents: None,
        };
        assert!(valid.validate().is_ok());

        let mut missing_name = valid.clone();
        missing_name.business_name = "  ".to_string();
        assert!(missing_name.validate().is_err());

        let mut missing_description = valid.clone();
        missing_description.description = String::new();
        assert!(missing_description.validate().is_err());

        let mut missing_categories = valid;
        missing_categories.categories.clear();
        assert!(missing_categories.validate().is_err());
    }

    #[test]
    fn category_serializes_capitalized() {
        assert_eq!(
            serde_json::to_string(&ServiceCategory::Photography).expect("serializes"),
            r#""Photography""#
        );
    }
}
