//! Reservation entity and related types

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::{
    parse_date, parse_time, validate_notes, validate_resource_id, ReservationValidationError,
};
use crate::domain::user::UserId;

/// Reservation identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationId(Uuid);

impl ReservationId {
    /// Generate a fresh identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier from its string form
    pub fn parse(value: &str) -> Result<Self, ReservationValidationError> {
        Uuid::parse_str(value.trim())
            .map(Self)
            .map_err(|_| ReservationValidationError::InvalidReservationId(value.to_string()))
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for ReservationId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ReservationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Bookable resource identifier, e.g. `court-1`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResourceId(String);

impl ResourceId {
    /// Create a new ResourceId after validation
    pub fn new(id: impl Into<String>) -> Result<Self, ReservationValidationError> {
        let id = id.into();
        validate_resource_id(&id)?;
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ResourceId {
    type Error = ReservationValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ResourceId> for String {
    fn from(id: ResourceId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status of a reservation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    /// Awaiting confirmation
    Pending,
    /// Confirmed booking
    #[default]
    Confirmed,
    /// Cancelled; never blocks other bookings
    Cancelled,
    /// Played
    Completed,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }

    /// Whether a reservation in this status occupies its slot
    pub fn blocks_slot(&self) -> bool {
        !matches!(self, Self::Cancelled)
    }

    /// Cancelled or played; the slot can no longer change
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Completed)
    }
}

impl std::str::FromStr for ReservationStatus {
    type Err = ReservationValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            "completed" => Ok(Self::Completed),
            other => Err(ReservationValidationError::UnknownStatus(other.to_string())),
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A date plus a half-open `[start, end)` time-of-day interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    date: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
}

impl TimeSlot {
    /// Create a slot; `start` must be strictly before `end`
    pub fn new(
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Result<Self, ReservationValidationError> {
        if start >= end {
            return Err(ReservationValidationError::EmptyInterval { start, end });
        }

        Ok(Self { date, start, end })
    }

    /// Parse a slot from `YYYY-MM-DD` and `HH:MM[:SS]` strings
    pub fn parse(date: &str, start: &str, end: &str) -> Result<Self, ReservationValidationError> {
        Self::new(parse_date(date)?, parse_time(start)?, parse_time(end)?)
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Half-open overlap on the same date
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.date == other.date && self.start < other.end && other.start < self.end
    }
}

impl std::fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}-{}",
            self.date,
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

/// Reservation entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    id: ReservationId,
    resource_id: ResourceId,
    user_id: UserId,
    slot: TimeSlot,
    status: ReservationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Reservation {
    /// Create a new confirmed reservation
    pub fn new(resource_id: ResourceId, user_id: UserId, slot: TimeSlot) -> Self {
        let now = Utc::now();

        Self {
            id: ReservationId::generate(),
            resource_id,
            user_id,
            slot,
            status: ReservationStatus::Confirmed,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild a reservation from a stored row
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: ReservationId,
        resource_id: ResourceId,
        user_id: UserId,
        slot: TimeSlot,
        status: ReservationStatus,
        notes: Option<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            resource_id,
            user_id,
            slot,
            status,
            notes,
            created_at,
            updated_at,
        }
    }

    /// Use a fixed identifier (builder pattern)
    pub fn with_id(mut self, id: ReservationId) -> Self {
        self.id = id;
        self
    }

    /// Set the initial status (builder pattern)
    pub fn with_status(mut self, status: ReservationStatus) -> Self {
        self.status = status;
        self
    }

    /// Attach notes (builder pattern)
    pub fn with_notes(
        mut self,
        notes: impl Into<String>,
    ) -> Result<Self, ReservationValidationError> {
        let notes = notes.into();
        validate_notes(&notes)?;
        self.notes = Some(notes);
        Ok(self)
    }

    // Getters

    pub fn id(&self) -> ReservationId {
        self.id
    }

    pub fn resource_id(&self) -> &ResourceId {
        &self.resource_id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn slot(&self) -> &TimeSlot {
        &self.slot
    }

    pub fn status(&self) -> ReservationStatus {
        self.status
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == ReservationStatus::Cancelled
    }

    // Mutators

    /// Move the reservation to another slot on the same resource
    pub fn reschedule(&mut self, slot: TimeSlot) {
        self.slot = slot;
        self.touch();
    }

    /// Cancel the reservation; returns false if it was already cancelled
    pub fn cancel(&mut self) -> bool {
        if self.is_cancelled() {
            return false;
        }

        self.status = ReservationStatus::Cancelled;
        self.touch();
        true
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
