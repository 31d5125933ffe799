//! Reservation service for booking, rescheduling and cancelling courts

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::eligibility::EligibilityChecker;
use crate::domain::reservation::{
    parse_date, OverlapQuery, Reservation, ReservationId, ReservationRepository, ResourceId,
    TimeSlot,
};
use crate::domain::user::{Actor, UserId};
use crate::domain::DomainError;

/// Request for creating a new reservation
#[derive(Debug, Clone)]
pub struct CreateReservationRequest {
    pub resource_id: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub notes: Option<String>,
}

/// Reservation service
///
/// Every write that claims a slot is preceded by a conflict check. The check
/// and the write are separate round trips; the store remains the only
/// arbiter between concurrent writers.
#[derive(Clone)]
pub struct ReservationService {
    repository: Arc<dyn ReservationRepository>,
    checker: EligibilityChecker,
}

impl ReservationService {
    /// Create a new reservation service
    pub fn new(repository: Arc<dyn ReservationRepository>, checker: EligibilityChecker) -> Self {
        Self {
            repository,
            checker,
        }
    }

    /// Book a slot for `user_id`
    pub async fn create(
        &self,
        user_id: &UserId,
        request: CreateReservationRequest,
    ) -> Result<Reservation, DomainError> {
        info!(
            user_id = %user_id,
            resource_id = %request.resource_id,
            date = %request.date,
            "Creating reservation"
        );

        let resource_id = ResourceId::new(&request.resource_id)
            .map_err(|e| DomainError::invalid_id(e.to_string()))?;
        let slot = TimeSlot::parse(&request.date, &request.start_time, &request.end_time)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        let mut reservation = Reservation::new(resource_id.clone(), user_id.clone(), slot);

        if let Some(notes) = request.notes.filter(|n| !n.trim().is_empty()) {
            reservation = reservation
                .with_notes(notes)
                .map_err(|e| DomainError::validation(e.to_string()))?;
        }

        self.ensure_slot_free(&OverlapQuery::for_slot(resource_id, &slot))
            .await?;

        self.repository.create(reservation).await
    }

    /// Move a reservation to a new slot on the same resource
    pub async fn reschedule(
        &self,
        actor: &Actor,
        id: &str,
        date: &str,
        start_time: &str,
        end_time: &str,
    ) -> Result<Reservation, DomainError> {
        info!(id = %id, user_id = %actor.user_id, "Rescheduling reservation");

        let slot = TimeSlot::parse(date, start_time, end_time)
            .map_err(|e| DomainError::validation(e.to_string()))?;
        let mut reservation = self.get_managed(actor, id).await?;

        if reservation.status().is_final() {
            return Err(DomainError::validation(format!(
                "A {} reservation cannot be rescheduled",
                reservation.status()
            )));
        }

        let query = OverlapQuery::for_slot(reservation.resource_id().clone(), &slot)
            .excluding(Some(reservation.id()));
        self.ensure_slot_free(&query).await?;

        reservation.reschedule(slot);
        self.repository.update(reservation).await
    }

    /// Cancel a reservation; cancelling twice is a no-op
    pub async fn cancel(&self, actor: &Actor, id: &str) -> Result<Reservation, DomainError> {
        info!(id = %id, user_id = %actor.user_id, "Cancelling reservation");

        let mut reservation = self.get_managed(actor, id).await?;

        if !reservation.cancel() {
            debug!(id = %id, "Reservation already cancelled");
            return Ok(reservation);
        }

        self.repository.update(reservation).await
    }

    /// Get a reservation the actor may see
    pub async fn get(&self, actor: &Actor, id: &str) -> Result<Reservation, DomainError> {
        self.get_managed(actor, id).await
    }

    /// Reservations made by a user
    pub async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Reservation>, DomainError> {
        self.repository.list_for_user(user_id).await
    }

    /// Reservations on one court for one day (any status)
    pub async fn list_for_resource(
        &self,
        resource_id: &str,
        date: &str,
    ) -> Result<Vec<Reservation>, DomainError> {
        let resource_id =
            ResourceId::new(resource_id).map_err(|e| DomainError::invalid_id(e.to_string()))?;
        let date = parse_date(date).map_err(|e| DomainError::validation(e.to_string()))?;

        self.repository.list_for_resource(&resource_id, date).await
    }

    /// Store connectivity for the readiness check
    pub async fn ping(&self) -> Result<(), DomainError> {
        self.repository.ping().await
    }

    async fn ensure_slot_free(&self, query: &OverlapQuery) -> Result<(), DomainError> {
        if self.checker.has_conflict(query).await {
            return Err(DomainError::conflict(format!(
                "Resource '{}' is not available on {} from {} to {}",
                query.resource_id,
                query.date,
                query.start.format("%H:%M"),
                query.end.format("%H:%M")
            )));
        }

        Ok(())
    }

    async fn get_managed(&self, actor: &Actor, id: &str) -> Result<Reservation, DomainError> {
        let reservation_id =
            ReservationId::parse(id).map_err(|e| DomainError::invalid_id(e.to_string()))?;

        let reservation = self
            .repository
            .get(&reservation_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Reservation '{}' not found", id)))?;

        if !actor.can_manage(reservation.user_id()) {
            // Indistinguishable from a missing row for non-owners
            return Err(DomainError::not_found(format!(
                "Reservation '{}' not found",
                id
            )));
        }

        Ok(reservation)
    }
}
