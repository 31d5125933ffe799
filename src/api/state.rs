//! Application state for shared services

use std::sync::Arc;

use crate::domain::eligibility::EligibilityChecker;
use crate::infrastructure::auth::TokenVerifier;
use crate::infrastructure::reservation::ReservationService;
use crate::infrastructure::storage::Repositories;
use crate::infrastructure::team::TeamService;

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub reservation_service: ReservationService,
    pub team_service: TeamService,
    pub checker: EligibilityChecker,
    pub token_verifier: Arc<dyn TokenVerifier>,
}

impl AppState {
    /// Wire services over a set of repositories
    pub fn new(repositories: Repositories, token_verifier: Arc<dyn TokenVerifier>) -> Self {
        let checker =
            EligibilityChecker::new(repositories.reservations.clone(), repositories.teams.clone());

        Self {
            reservation_service: ReservationService::new(
                repositories.reservations,
                checker.clone(),
            ),
            team_service: TeamService::new(repositories.teams, checker.clone()),
            checker,
            token_verifier,
        }
    }
}
