//! Postgres-backed profile store
//!
//! One row per vendor with JSONB columns for the embedded arrays. The
//! availability and portfolio mutations lock the row (`FOR UPDATE`) so
//! the find-or-append step and the persist commit as one unit.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::availability::{Availability, SlotStatus};
use crate::domain::vendor::{
    ContactInfo, Location, PerformanceMetrics, Portfolio, PortfolioItem, PortfolioItemKind,
    ServiceCategory, ServiceOffering, VerificationDocument,
};
use crate::domain::VendorProfile;

use super::{ProfileStore, StoreError};

#[derive(Clone)]
pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row for a vendor profile document.
#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    vendor_id: Uuid,
    business_name: String,
    description: String,
    categories: serde_json::Value,
    services: serde_json::Value,
    availability: serde_json::Value,
    performance: serde_json::Value,
    location: serde_json::Value,
    contact: serde_json::Value,
    documents: serde_json::Value,
    portfolio: serde_json::Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProfileRow> for VendorProfile {
    fn from(row: ProfileRow) -> Self {
        let categories: Vec<ServiceCategory> =
            serde_json::from_value(row.categories).unwrap_or_default();
        let services: Vec<ServiceOffering> =
            serde_json::from_value(row.services).unwrap_or_default();
        let documents: Vec<VerificationDocument> =
            serde_json::from_value(row.documents).unwrap_or_default();

        Self {
            vendor_id: row.vendor_id,
            business_name: row.business_name,
            description: row.description,
            categories,
            services,
            availability: serde_json::from_value::<Availability>(row.availability)
                .unwrap_or_default(),
            performance: serde_json::from_value::<PerformanceMetrics>(row.performance)
                .unwrap_or_default(),
            location: serde_json::from_value::<Location>(row.location).unwrap_or_default(),
            contact: serde_json::from_value::<ContactInfo>(row.contact).unwrap_or_default(),
            documents,
            portfolio: serde_json::from_value::<Portfolio>(row.portfolio).unwrap_or_default(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const SELECT_COLUMNS: &str = r#"
    vendor_id, business_name, description, categories, services,
    availability, performance, location, contact, documents, portfolio,
    created_at, updated_at
"#;

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn find(&self, vendor_id: Uuid) -> Result<Option<VendorProfile>, StoreError> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM vendor_profiles WHERE vendor_id = $1"
        ))
        .bind(vendor_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(VendorProfile::from))
    }

    async fn upsert(&self, mut profile: VendorProfile) -> Result<VendorProfile, StoreError> {
        // Explicit touch-on-write; the row carries no trigger for this.
        profile.updated_at = Utc::now();

        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            r#"
            INSERT INTO vendor_profiles (
                vendor_id, business_name, description, categories, services,
                availability, performance, location, contact, documents,
                portfolio, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            ON CONFLICT (vendor_id) DO UPDATE SET
                business_name = EXCLUDED.business_name,
                description = EXCLUDED.description,
                categories = EXCLUDED.categories,
                services = EXCLUDED.services,
                availability = EXCLUDED.availability,
                performance = EXCLUDED.performance,
                location = EXCLUDED.location,
                contact = EXCLUDED.contact,
                documents = EXCLUDED.documents,
                portfolio = EXCLUDED.portfolio,
                updated_at = EXCLUDED.updated_at
            RETURNING {SELECT_COLUMNS}
            "#
        ))
        .bind(profile.vendor_id)
        .bind(&profile.business_name)
        .bind(&profile.description)
        .bind(to_json(&profile.categories)?)
        .bind(to_json(&profile.services)?)
        .bind(to_json(&profile.availability)?)
        .bind(to_json(&profile.performance)?)
        .bind(to_json(&profile.location)?)
        .bind(to_json(&profile.contact)?)
        .bind(to_json(&profile.documents)?)
        .bind(to_json(&profile.portfolio)?)
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn candidates_in_category(
        &self,
        category: ServiceCategory,
    ) -> Result<Vec<VendorProfile>, StoreError> {
        // Enumeration order is part of the matching contract: equal
        // scores keep this order in the final ranking.
        let rows = sqlx::query_as::<_, ProfileRow>(&format!(
            r#"
            SELECT {SELECT_COLUMNS}
            FROM vendor_profiles
            WHERE categories @> jsonb_build_array($1::text)
            ORDER BY created_at ASC, vendor_id ASC
            "#
        ))
        .bind(category.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(VendorProfile::from).collect())
    }

    async fn set_slot(
        &self,
        vendor_id: Uuid,
        date: NaiveDate,
        status: SlotStatus,
        event_id: Option<Uuid>,
    ) -> Result<Availability, StoreError> {
        let mut tx = self.pool.begin().await?;

        let raw: Option<serde_json::Value> = sqlx::query_scalar(
            "SELECT availability FROM vendor_profiles WHERE vendor_id = $1 FOR UPDATE",
        )
        .bind(vendor_id)
        .fetch_optional(&mut *tx)
        .await?;

        let raw = raw.ok_or(StoreError::ProfileNotFound)?;
        let mut availability: Availability = serde_json::from_value(raw).unwrap_or_default();
        availability.set_slot(date, status, event_id);

        sqlx::query(
            "UPDATE vendor_profiles SET availability = $2, updated_at = NOW() WHERE vendor_id = $1",
        )
        .bind(vendor_id)
        .bind(to_json(&availability)?)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(availability)
    }

    async fn add_portfolio_item(
        &self,
        vendor_id: Uuid,
        kind: PortfolioItemKind,
        item: PortfolioItem,
    ) -> Result<Portfolio, StoreError> {
        let mut tx = self.pool.begin().await?;

        let raw: Option<serde_json::Value> = sqlx::query_scalar(
            "SELECT portfolio FROM vendor_profiles WHERE vendor_id = $1 FOR UPDATE",
        )
        .bind(vendor_id)
        .fetch_optional(&mut *tx)
        .await?;

        let raw = raw.ok_or(StoreError::ProfileNotFound)?;
        let mut portfolio: Portfolio = serde_json::from_value(raw).unwrap_or_default();
        match kind {
            PortfolioItemKind::Image => portfolio.images.push(item),
            PortfolioItemKind::Video => portfolio.videos.push(item),
        }

        sqlx::query(
            "UPDATE vendor_profiles SET portfolio = $2, updated_at = NOW() WHERE vendor_id = $1",
        )
        .bind(vendor_id)
        .bind(to_json(&portfolio)?)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(portfolio)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, StoreError> {
    serde_json::to_value(value).map_err(|e| StoreError::Unavailable(e.to_string()))
}
