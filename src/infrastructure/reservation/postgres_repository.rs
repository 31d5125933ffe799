//! PostgreSQL reservation repository implementation

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::reservation::{
    OverlapQuery, Reservation, ReservationId, ReservationRepository, ReservationStatus,
    ResourceId, TimeSlot,
};
use crate::domain::user::UserId;
use crate::domain::DomainError;

const RESERVATION_COLUMNS: &str = "id, resource_id, user_id, date, start_time, end_time, \
                                   status, notes, created_at, updated_at";

/// PostgreSQL implementation of ReservationRepository
#[derive(Debug, Clone)]
pub struct PostgresReservationRepository {
    pool: PgPool,
}

impl PostgresReservationRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReservationRepository for PostgresReservationRepository {
    async fn find_overlapping(&self, query: &OverlapQuery) -> Result<Vec<Reservation>, DomainError> {
        let sql = format!(
            r#"
            SELECT {RESERVATION_COLUMNS}
            FROM reservations
            WHERE resource_id = $1
              AND date = $2
              AND status <> 'cancelled'
              AND start_time < $4
              AND end_time > $3
              AND ($5::uuid IS NULL OR id <> $5)
            ORDER BY start_time
            "#
        );

        let rows = sqlx::query(&sql)
            .bind(query.resource_id.as_str())
            .bind(query.date)
            .bind(query.start)
            .bind(query.end)
            .bind(query.exclude.map(|id| *id.as_uuid()))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                DomainError::storage(format!("Failed to query overlapping reservations: {}", e))
            })?;

        rows.iter().map(row_to_reservation).collect()
    }

    async fn get(&self, id: &ReservationId) -> Result<Option<Reservation>, DomainError> {
        let sql = format!("SELECT {RESERVATION_COLUMNS} FROM reservations WHERE id = $1");

        let row = sqlx::query(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get reservation: {}", e)))?;

        match row {
            Some(row) => Ok(Some(row_to_reservation(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, reservation: Reservation) -> Result<Reservation, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO reservations (id, resource_id, user_id, date, start_time, end_time,
                                      status, notes, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(reservation.id().as_uuid())
        .bind(reservation.resource_id().as_str())
        .bind(reservation.user_id().as_str())
        .bind(reservation.slot().date())
        .bind(reservation.slot().start())
        .bind(reservation.slot().end())
        .bind(reservation.status().as_str())
        .bind(reservation.notes())
        .bind(reservation.created_at())
        .bind(reservation.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let msg = e.to_string();

            if msg.contains("duplicate key") || msg.contains("unique constraint") {
                DomainError::conflict(format!(
                    "Reservation '{}' already exists",
                    reservation.id()
                ))
            } else {
                DomainError::storage(format!("Failed to create reservation: {}", e))
            }
        })?;

        Ok(reservation)
    }

    async fn update(&self, reservation: Reservation) -> Result<Reservation, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE reservations
            SET date = $2, start_time = $3, end_time = $4, status = $5, notes = $6,
                updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(reservation.id().as_uuid())
        .bind(reservation.slot().date())
        .bind(reservation.slot().start())
        .bind(reservation.slot().end())
        .bind(reservation.status().as_str())
        .bind(reservation.notes())
        .bind(reservation.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to update reservation: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "Reservation '{}' not found",
                reservation.id()
            )));
        }

        Ok(reservation)
    }

    async fn list_for_resource(
        &self,
        resource_id: &ResourceId,
        date: NaiveDate,
    ) -> Result<Vec<Reservation>, DomainError> {
        let sql = format!(
            r#"
            SELECT {RESERVATION_COLUMNS}
            FROM reservations
            WHERE resource_id = $1 AND date = $2
            ORDER BY start_time
            "#
        );

        let rows = sqlx::query(&sql)
            .bind(resource_id.as_str())
            .bind(date)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list reservations: {}", e)))?;

        rows.iter().map(row_to_reservation).collect()
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Reservation>, DomainError> {
        let sql = format!(
            r#"
            SELECT {RESERVATION_COLUMNS}
            FROM reservations
            WHERE user_id = $1
            ORDER BY date DESC, start_time
            "#
        );

        let rows = sqlx::query(&sql)
            .bind(user_id.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                DomainError::storage(format!("Failed to list user reservations: {}", e))
            })?;

        rows.iter().map(row_to_reservation).collect()
    }

    async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Database ping failed: {}", e)))?;

        Ok(())
    }
}

fn row_to_reservation(row: &sqlx::postgres::PgRow) -> Result<Reservation, DomainError> {
    let id: Uuid = row.get("id");
    let resource_id: String = row.get("resource_id");
    let user_id: String = row.get("user_id");
    let date: NaiveDate = row.get("date");
    let start_time: NaiveTime = row.get("start_time");
    let end_time: NaiveTime = row.get("end_time");
    let status: String = row.get("status");
    let notes: Option<String> = row.get("notes");
    let created_at: DateTime<Utc> = row.get("created_at");
    let updated_at: DateTime<Utc> = row.get("updated_at");

    let resource_id = ResourceId::new(resource_id)
        .map_err(|e| DomainError::storage(format!("Invalid resource ID in database: {}", e)))?;
    let user_id = UserId::new(user_id)
        .map_err(|e| DomainError::storage(format!("Invalid user ID in database: {}", e)))?;
    let slot = TimeSlot::new(date, start_time, end_time)
        .map_err(|e| DomainError::storage(format!("Invalid slot in database: {}", e)))?;
    let status: ReservationStatus = status
        .parse()
        .map_err(|e| DomainError::storage(format!("Invalid status in database: {}", e)))?;

    Ok(Reservation::restore(
        ReservationId::from(id),
        resource_id,
        user_id,
        slot,
        status,
        notes,
        created_at,
        updated_at,
    ))
}
