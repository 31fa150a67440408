//! Domain types and DTOs
//!
//! The vendor profile aggregate and the matching engine's inputs and
//! outputs. The profile is document-shaped: nested value types owned by
//! the aggregate, no shared references between embedded records.

pub mod availability;
pub mod matching;
pub mod vendor;

pub use availability::{Availability, AvailabilitySlot, SlotStatus, WorkingHours};
pub use matching::{MatchCriteria, VendorMatch};
pub use vendor::*;
