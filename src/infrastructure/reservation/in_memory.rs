//! In-memory reservation repository

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::reservation::{
    OverlapQuery, Reservation, ReservationId, ReservationRepository, ResourceId,
};
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Thread-safe in-memory reservation store
///
/// Useful for testing and development. Data is lost when the process terminates.
#[derive(Debug, Default)]
pub struct InMemoryReservationRepository {
    reservations: RwLock<HashMap<ReservationId, Reservation>>,
}

impl InMemoryReservationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated with reservations
    pub fn with_reservations(reservations: Vec<Reservation>) -> Self {
        let map = reservations.into_iter().map(|r| (r.id(), r)).collect();

        Self {
            reservations: RwLock::new(map),
        }
    }

    fn read(
        &self,
    ) -> Result<std::sync::RwLockReadGuard<'_, HashMap<ReservationId, Reservation>>, DomainError>
    {
        self.reservations
            .read()
            .map_err(|e| DomainError::storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<ReservationId, Reservation>>, DomainError>
    {
        self.reservations
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))
    }
}

#[async_trait]
impl ReservationRepository for InMemoryReservationRepository {
    async fn find_overlapping(&self, query: &OverlapQuery) -> Result<Vec<Reservation>, DomainError> {
        let reservations = self.read()?;

        let mut result: Vec<Reservation> = reservations
            .values()
            .filter(|r| query.matches(r))
            .cloned()
            .collect();

        result.sort_by_key(|r| r.slot().start());
        Ok(result)
    }

    async fn get(&self, id: &ReservationId) -> Result<Option<Reservation>, DomainError> {
        Ok(self.read()?.get(id).cloned())
    }

    async fn create(&self, reservation: Reservation) -> Result<Reservation, DomainError> {
        let mut reservations = self.write()?;

        if reservations.contains_key(&reservation.id()) {
            return Err(DomainError::conflict(format!(
                "Reservation '{}' already exists",
                reservation.id()
            )));
        }

        reservations.insert(reservation.id(), reservation.clone());
        Ok(reservation)
    }

    async fn update(&self, reservation: Reservation) -> Result<Reservation, DomainError> {
        let mut reservations = self.write()?;

        if !reservations.contains_key(&reservation.id()) {
            return Err(DomainError::not_found(format!(
                "Reservation '{}' not found",
                reservation.id()
            )));
        }

        reservations.insert(reservation.id(), reservation.clone());
        Ok(reservation)
    }

    async fn list_for_resource(
        &self,
        resource_id: &ResourceId,
        date: NaiveDate,
    ) -> Result<Vec<Reservation>, DomainError> {
        let reservations = self.read()?;

        let mut result: Vec<Reservation> = reservations
            .values()
            .filter(|r| r.resource_id() == resource_id && r.slot().date() == date)
            .cloned()
            .collect();

        result.sort_by_key(|r| r.slot().start());
        Ok(result)
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Reservation>, DomainError> {
        let reservations = self.read()?;

        let mut result: Vec<Reservation> = reservations
            .values()
            .filter(|r| r.user_id() == user_id)
            .cloned()
            .collect();

        result.sort_by(|a, b| {
            b.slot()
                .date()
                .cmp(&a.slot().date())
                .then(a.slot().start().cmp(&b.slot().start()))
        });
        Ok(result)
    }

    async fn ping(&self) -> Result<(), DomainError> {
        self.read().map(|_| ())
    }
}
