//! Endpoints for signed-in users

pub mod reservations;
pub mod teams;

use axum::{
    routing::{get, post},
    Router,
};

use super::state::AppState;

/// Create the user-facing API router
pub fn create_user_router() -> Router<AppState> {
    Router::new()
        .route(
            "/reservations",
            get(reservations::list_reservations).post(reservations::create_reservation),
        )
        .route("/reservations/conflicts", post(reservations::check_conflict))
        .route(
            "/reservations/{reservation_id}",
            get(reservations::get_reservation).put(reservations::reschedule_reservation),
        )
        .route(
            "/reservations/{reservation_id}/cancel",
            post(reservations::cancel_reservation),
        )
        .route("/teams", post(teams::create_team))
        .route("/teams/eligibility", get(teams::team_eligibility))
        .route("/teams/owned", get(teams::owned_team))
        .route("/teams/memberships", get(teams::list_memberships))
}
