//! Reservation repository trait

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
#[cfg(test)]
use mockall::automock;

use super::entity::{Reservation, ReservationId, ResourceId, TimeSlot};
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Filter for non-cancelled reservations overlapping a proposed interval
///
/// `start`/`end` are taken as given; callers that need `start < end` must
/// check it themselves (see [`TimeSlot::new`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlapQuery {
    pub resource_id: ResourceId,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    /// Reservation that never counts against itself
    pub exclude: Option<ReservationId>,
}

impl OverlapQuery {
    pub fn new(resource_id: ResourceId, date: NaiveDate, start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            resource_id,
            date,
            start,
            end,
            exclude: None,
        }
    }

    /// Build a query for an already validated slot
    pub fn for_slot(resource_id: ResourceId, slot: &TimeSlot) -> Self {
        Self::new(resource_id, slot.date(), slot.start(), slot.end())
    }

    pub fn excluding(mut self, id: Option<ReservationId>) -> Self {
        self.exclude = id;
        self
    }

    /// The predicate every backend must implement
    pub fn matches(&self, reservation: &Reservation) -> bool {
        let slot = reservation.slot();

        reservation.status().blocks_slot()
            && reservation.resource_id() == &self.resource_id
            && slot.date() == self.date
            && slot.start() < self.end
            && slot.end() > self.start
            && self.exclude != Some(reservation.id())
    }
}

/// Repository for reservations held by the external store
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Non-cancelled reservations matching the overlap query
    async fn find_overlapping(&self, query: &OverlapQuery) -> Result<Vec<Reservation>, DomainError>;

    /// Get a reservation by ID
    async fn get(&self, id: &ReservationId) -> Result<Option<Reservation>, DomainError>;

    /// Insert a new reservation
    async fn create(&self, reservation: Reservation) -> Result<Reservation, DomainError>;

    /// Persist slot, status and notes of an existing reservation
    async fn update(&self, reservation: Reservation) -> Result<Reservation, DomainError>;

    /// All reservations (any status) on a resource for one date, by start time
    async fn list_for_resource(
        &self,
        resource_id: &ResourceId,
        date: NaiveDate,
    ) -> Result<Vec<Reservation>, DomainError>;

    /// All reservations made by a user, most recent date first
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Reservation>, DomainError>;

    /// Cheap round trip used by the readiness check
    async fn ping(&self) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::reservation::ReservationStatus;

    fn existing(status: ReservationStatus) -> Reservation {
        Reservation::new(
            ResourceId::new("court-1").unwrap(),
            UserId::new("user-1").unwrap(),
            TimeSlot::parse("2024-06-01", "09:00", "10:00").unwrap(),
        )
        .with_status(status)
    }

    fn query(resource: &str, date: &str, start: &str, end: &str) -> OverlapQuery {
        let slot = TimeSlot::parse(date, start, end).unwrap();
        OverlapQuery::for_slot(ResourceId::new(resource).unwrap(), &slot)
    }

    #[test]
    fn test_matches_overlap() {
        let reservation = existing(ReservationStatus::Confirmed);
        assert!(query("court-1", "2024-06-01", "09:30", "10:30").matches(&reservation));
    }

    #[test]
    fn test_touching_boundary_does_not_match() {
        let reservation = existing(ReservationStatus::Confirmed);
        assert!(!query("court-1", "2024-06-01", "10:00", "11:00").matches(&reservation));
        assert!(!query("court-1", "2024-06-01", "08:00", "09:00").matches(&reservation));
    }

    #[test]
    fn test_cancelled_never_matches() {
        let reservation = existing(ReservationStatus::Cancelled);
        assert!(!query("court-1", "2024-06-01", "09:00", "10:00").matches(&reservation));
    }

    #[test]
    fn test_pending_and_completed_match() {
        let pending = existing(ReservationStatus::Pending);
        let completed = existing(ReservationStatus::Completed);
        let q = query("court-1", "2024-06-01", "09:15", "09:45");

        assert!(q.matches(&pending));
        assert!(q.matches(&completed));
    }

    #[test]
    fn test_other_resource_or_date_does_not_match() {
        let reservation = existing(ReservationStatus::Confirmed);
        assert!(!query("court-2", "2024-06-01", "09:00", "10:00").matches(&reservation));
        assert!(!query("court-1", "2024-06-02", "09:00", "10:00").matches(&reservation));
    }

    #[test]
    fn test_excluded_id_does_not_match() {
        let reservation = existing(ReservationStatus::Confirmed);
        let q = query("court-1", "2024-06-01", "09:00", "10:00").excluding(Some(reservation.id()));
        assert!(!q.matches(&reservation));

        let other = query("court-1", "2024-06-01", "09:00", "10:00")
            .excluding(Some(ReservationId::generate()));
        assert!(other.matches(&reservation));
    }
}
