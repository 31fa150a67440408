//! Persistent profile store
//!
//! Storage abstraction over the vendor profile collection so route
//! handlers and the matching engine can be exercised against an
//! in-memory implementation in tests. The production implementation is
//! Postgres-backed (`PgProfileStore`).

pub mod postgres;

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::availability::{Availability, SlotStatus};
use crate::domain::vendor::{Portfolio, PortfolioItem, PortfolioItemKind, ServiceCategory};
use crate::domain::VendorProfile;

pub use postgres::PgProfileStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("profile not found")]
    ProfileNotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        Self::Unavailable(err.to_string())
    }
}

/// Vendor profile collection operations.
///
/// Mutations against a single vendor's document (`upsert`, `set_slot`,
/// `add_portfolio_item`) are each applied as one atomic read-modify-write;
/// concurrent writers to the same vendor land in last-write-wins order
/// and never produce duplicate schedule entries.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Look up a vendor's profile document.
    async fn find(&self, vendor_id: Uuid) -> Result<Option<VendorProfile>, StoreError>;

    /// Replace-or-create the full profile document, touching
    /// `updated_at` as part of the persist.
    async fn upsert(&self, profile: VendorProfile) -> Result<VendorProfile, StoreError>;

    /// All profiles whose category set contains `category`, in a
    /// deterministic enumeration order (the matching engine's tie-break
    /// depends on it).
    async fn candidates_in_category(
        &self,
        category: ServiceCategory,
    ) -> Result<Vec<VendorProfile>, StoreError>;

    /// Atomically record or update one date's status in the vendor's
    /// availability ledger, returning the updated ledger.
    async fn set_slot(
        &self,
        vendor_id: Uuid,
        date: NaiveDate,
        status: SlotStatus,
        event_id: Option<Uuid>,
    ) -> Result<Availability, StoreError>;

    /// Atomically append an item to the vendor's portfolio, returning
    /// the updated portfolio.
    async fn add_portfolio_item(
        &self,
        vendor_id: Uuid,
        kind: PortfolioItemKind,
        item: PortfolioItem,
    ) -> Result<Portfolio, StoreError>;

    /// Store connectivity check for the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;
}
