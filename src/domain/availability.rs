//! Vendor availability ledger
//!
//! A sparse calendar of date → status entries embedded in the vendor
//! profile. At most one entry exists per calendar date; a date with no
//! entry is implicitly "open", which is distinct from an explicit
//! `available` entry. All comparisons are at date granularity — any
//! time-of-day component in the input is discarded before matching.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status of a single schedule slot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    #[default]
    Available,
    Booked,
    Unavailable,
}

impl std::fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available => write!(f, "available"),
            Self::Booked => write!(f, "booked"),
            Self::Unavailable => write!(f, "unavailable"),
        }
    }
}

/// One entry in the schedule: a calendar date with its booking status.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AvailabilitySlot {
    #[serde(with = "date_only")]
    pub date: NaiveDate,
    #[serde(default)]
    pub status: SlotStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<Uuid>,
}

/// Working hours as "HH:MM" strings. Descriptive only — matching does
/// not enforce them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkingHours {
    pub start: String,
    pub end: String,
}

impl Default for WorkingHours {
    fn default() -> Self {
        Self {
            start: "09:00".to_string(),
            end: "17:00".to_string(),
        }
    }
}

fn default_advance_booking_days() -> u32 {
    30
}

/// Per-vendor availability ledger embedded in the profile document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Availability {
    #[serde(default)]
    pub schedule: Vec<AvailabilitySlot>,
    #[serde(default)]
    pub working_hours: WorkingHours,
    #[serde(default = "default_advance_booking_days")]
    pub advance_booking_days: u32,
}

impl Default for Availability {
    fn default() -> Self {
        Self {
            schedule: Vec::new(),
            working_hours: WorkingHours::default(),
            advance_booking_days: default_advance_booking_days(),
        }
    }
}

impl Availability {
    /// Record or update the status for a single date.
    ///
    /// If an entry for `date` exists its status (and event reference,
    /// when supplied) is overwritten in place; otherwise a new entry is
    /// appended. Calling twice with identical arguments leaves exactly
    /// one entry for the date.
    pub fn set_slot(&mut self, date: NaiveDate, status: SlotStatus, event_id: Option<Uuid>) {
        match self.schedule.iter_mut().find(|slot| slot.date == date) {
            Some(slot) => {
                slot.status = status;
                if event_id.is_some() {
                    slot.event_id = event_id;
                }
            }
            None => self.schedule.push(AvailabilitySlot {
                date,
                status,
                event_id,
            }),
        }
    }

    /// Slots whose date falls within `[start, end]` inclusive, in stored
    /// (insertion) order. An inverted range yields an empty result.
    pub fn slots_in_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<AvailabilitySlot> {
        self.schedule
            .iter()
            .filter(|slot| slot.date >= start && slot.date <= end)
            .cloned()
            .collect()
    }

    /// Whether the vendor has an explicit `available` entry for `date`.
    /// A date with no entry is open/unknown and does not qualify.
    pub fn is_available_on(&self, date: NaiveDate) -> bool {
        self.schedule
            .iter()
            .any(|slot| slot.date == date && slot.status == SlotStatus::Available)
    }
}

/// Serde codec for calendar dates that tolerates timestamp inputs.
///
/// Clients send both plain dates (`2024-05-01`) and timestamps
/// (`2024-05-01T23:00:00Z`); two timestamps on the same calendar day
/// must resolve to the same slot, so the time-of-day component is
/// dropped on the way in. Serialization always emits the plain form.
pub mod date_only {
    use chrono::{DateTime, NaiveDate, NaiveDateTime};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format("%Y-%m-%d").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid calendar date: {raw}")))
    }

    /// Parse a calendar date from a date or timestamp string,
    /// discarding any time-of-day component.
    pub fn parse(raw: &str) -> Option<NaiveDate> {
        if let Ok(date) = raw.parse::<NaiveDate>() {
            return Some(date);
        }
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.date_naive());
        }
        for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
            if let Ok(ts) = NaiveDateTime::parse_from_str(raw, format) {
                return Some(ts.date());
            }
        }
        None
    }
}
