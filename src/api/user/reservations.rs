//! Reservation endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::reservation::{parse_date, parse_time, Reservation, ReservationId, ResourceId};
use crate::infrastructure::reservation::CreateReservationRequest;

/// Body of a conflict check
#[derive(Debug, Clone, Deserialize)]
pub struct CheckConflictRequest {
    pub resource_id: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    /// The caller's own reservation when rescheduling
    #[serde(default)]
    pub exclude_reservation_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictResponse {
    pub conflict: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateReservationApiRequest {
    pub resource_id: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Move a reservation to another slot
#[derive(Debug, Clone, Deserialize)]
pub struct RescheduleReservationApiRequest {
    pub date: String,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationResponse {
    pub id: String,
    pub resource_id: String,
    pub user_id: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Reservation> for ReservationResponse {
    fn from(reservation: &Reservation) -> Self {
        let slot = reservation.slot();

        Self {
            id: reservation.id().to_string(),
            resource_id: reservation.resource_id().to_string(),
            user_id: reservation.user_id().to_string(),
            date: slot.date().format("%Y-%m-%d").to_string(),
            start_time: slot.start().format("%H:%M").to_string(),
            end_time: slot.end().format("%H:%M").to_string(),
            status: reservation.status().to_string(),
            notes: reservation.notes().map(String::from),
            created_at: reservation.created_at().to_rfc3339(),
            updated_at: reservation.updated_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListReservationsResponse {
    pub reservations: Vec<ReservationResponse>,
    pub total: usize,
}

impl From<Vec<Reservation>> for ListReservationsResponse {
    fn from(reservations: Vec<Reservation>) -> Self {
        let reservations: Vec<ReservationResponse> =
            reservations.iter().map(ReservationResponse::from).collect();
        let total = reservations.len();

        Self {
            reservations,
            total,
        }
    }
}

/// POST /api/reservations/conflicts
///
/// `true` also when the check itself could not run.
pub async fn check_conflict(
    State(state): State<AppState>,
    RequireUser(actor): RequireUser,
    Json(request): Json<CheckConflictRequest>,
) -> Result<Json<ConflictResponse>, ApiError> {
    let resource_id = ResourceId::new(&request.resource_id)
        .map_err(|e| ApiError::bad_request(e.to_string()).with_param("resource_id"))?;
    let date = parse_date(&request.date)
        .map_err(|e| ApiError::bad_request(e.to_string()).with_param("date"))?;
    let start = parse_time(&request.start_time)
        .map_err(|e| ApiError::bad_request(e.to_string()).with_param("start_time"))?;
    let end = parse_time(&request.end_time)
        .map_err(|e| ApiError::bad_request(e.to_string()).with_param("end_time"))?;

    if start >= end {
        return Err(ApiError::bad_request("start_time must be before end_time")
            .with_param("end_time"));
    }

    let exclude = request
        .exclude_reservation_id
        .as_deref()
        .map(ReservationId::parse)
        .transpose()
        .map_err(|e| ApiError::bad_request(e.to_string()).with_param("exclude_reservation_id"))?;

    debug!(
        user_id = %actor.user_id,
        resource_id = %resource_id,
        date = %date,
        "Checking booking conflict"
    );

    let conflict = state
        .checker
        .check_booking_conflict(&resource_id, date, start, end, exclude)
        .await;

    Ok(Json(ConflictResponse { conflict }))
}

/// POST /api/reservations
pub async fn create_reservation(
    State(state): State<AppState>,
    RequireUser(actor): RequireUser,
    Json(request): Json<CreateReservationApiRequest>,
) -> Result<(StatusCode, Json<ReservationResponse>), ApiError> {
    let service_request = CreateReservationRequest {
        resource_id: request.resource_id,
        date: request.date,
        start_time: request.start_time,
        end_time: request.end_time,
        notes: request.notes,
    };

    let reservation = state
        .reservation_service
        .create(&actor.user_id, service_request)
        .await
        .map_err(ApiError::from)?;

    Ok((StatusCode::CREATED, Json(ReservationResponse::from(&reservation))))
}

/// GET /api/reservations
pub async fn list_reservations(
    State(state): State<AppState>,
    RequireUser(actor): RequireUser,
) -> Result<Json<ListReservationsResponse>, ApiError> {
    let reservations = state
        .reservation_service
        .list_for_user(&actor.user_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(ListReservationsResponse::from(reservations)))
}

/// GET /api/reservations/{reservation_id}
pub async fn get_reservation(
    State(state): State<AppState>,
    RequireUser(actor): RequireUser,
    Path(reservation_id): Path<String>,
) -> Result<Json<ReservationResponse>, ApiError> {
    let reservation = state
        .reservation_service
        .get(&actor, &reservation_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(ReservationResponse::from(&reservation)))
}

/// PUT /api/reservations/{reservation_id}
pub async fn reschedule_reservation(
    State(state): State<AppState>,
    RequireUser(actor): RequireUser,
    Path(reservation_id): Path<String>,
    Json(request): Json<RescheduleReservationApiRequest>,
) -> Result<Json<ReservationResponse>, ApiError> {
    let reservation = state
        .reservation_service
        .reschedule(
            &actor,
            &reservation_id,
            &request.date,
            &request.start_time,
            &request.end_time,
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Json(ReservationResponse::from(&reservation)))
}

/// POST /api/reservations/{reservation_id}/cancel
pub async fn cancel_reservation(
    State(state): State<AppState>,
    RequireUser(actor): RequireUser,
    Path(reservation_id): Path<String>,
) -> Result<Json<ReservationResponse>, ApiError> {
    let reservation = state
        .reservation_service
        .cancel(&actor, &reservation_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(ReservationResponse::from(&reservation)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::reservation::TimeSlot;
    use crate::domain::user::UserId;

    #[test]
    fn test_conflict_request_exclusion_optional() {
        let request: CheckConflictRequest = serde_json::from_str(
            r#"{"resource_id":"court-1","date":"2024-06-01","start_time":"09:30","end_time":"10:30"}"#,
        )
        .unwrap();

        assert_eq!(request.resource_id, "court-1");
        assert!(request.exclude_reservation_id.is_none());
    }

    #[test]
    fn test_reservation_response_formatting() {
        let reservation = Reservation::new(
            ResourceId::new("court-1").unwrap(),
            UserId::new("user-1").unwrap(),
            TimeSlot::parse("2024-06-01", "09:00", "10:30").unwrap(),
        );

        let response = ReservationResponse::from(&reservation);

        assert_eq!(response.date, "2024-06-01");
        assert_eq!(response.start_time, "09:00");
        assert_eq!(response.end_time, "10:30");
        assert_eq!(response.status, "confirmed");

        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("notes"));
    }

    #[test]
    fn test_conflict_response_shape() {
        let json = serde_json::to_string(&ConflictResponse { conflict: true }).unwrap();
        assert_eq!(json, r#"{"conflict":true}"#);
    }
}
