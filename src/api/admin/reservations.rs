//! Court schedule for administrators

use axum::extract::{Query, State};
use serde::Deserialize;
use tracing::debug;

use crate::api::middleware::RequireAdmin;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::api::user::reservations::ListReservationsResponse;

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleQuery {
    pub resource_id: String,
    pub date: String,
}

/// GET /admin/reservations?resource_id=&date=
///
/// All reservations on one court for one day, cancelled ones included.
pub async fn list_reservations(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Query(query): Query<ScheduleQuery>,
) -> Result<Json<ListReservationsResponse>, ApiError> {
    debug!(
        admin = %admin.user_id,
        resource_id = %query.resource_id,
        date = %query.date,
        "Admin listing court schedule"
    );

    let reservations = state
        .reservation_service
        .list_for_resource(&query.resource_id, &query.date)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(ListReservationsResponse::from(reservations)))
}
