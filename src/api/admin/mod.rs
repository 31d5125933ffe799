//! Admin API endpoints

pub mod reservations;

use axum::{routing::get, Router};

use super::state::AppState;

/// Create admin API router
pub fn create_admin_router() -> Router<AppState> {
    Router::new().route("/reservations", get(reservations::list_reservations))
}
