//! Conflict and eligibility checker

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use tracing::{debug, error, warn};

use super::policy::{BOOKING_CONFLICT_POLICY, TEAM_CREATION_POLICY};
use crate::domain::reservation::{OverlapQuery, ReservationId, ReservationRepository, ResourceId};
use crate::domain::team::TeamRepository;
use crate::domain::user::UserId;

/// Answers "would this booking double-book?" and "may this user create a team?"
///
/// Stateless: every call issues exactly one query and interprets the result.
/// There is no retry and no caching.
#[derive(Clone)]
pub struct EligibilityChecker {
    reservations: Arc<dyn ReservationRepository>,
    teams: Arc<dyn TeamRepository>,
}

impl EligibilityChecker {
    pub fn new(reservations: Arc<dyn ReservationRepository>, teams: Arc<dyn TeamRepository>) -> Self {
        Self {
            reservations,
            teams,
        }
    }

    /// True if a non-cancelled reservation on `resource_id` and `date`
    /// overlaps `[start, end)`, not counting `exclude`.
    ///
    /// `start < end` is assumed, not validated.
    pub async fn check_booking_conflict(
        &self,
        resource_id: &ResourceId,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
        exclude: Option<ReservationId>,
    ) -> bool {
        let query = OverlapQuery::new(resource_id.clone(), date, start, end).excluding(exclude);
        self.has_conflict(&query).await
    }

    /// Same as [`check_booking_conflict`](Self::check_booking_conflict) for a prepared query
    pub async fn has_conflict(&self, query: &OverlapQuery) -> bool {
        match self.reservations.find_overlapping(query).await {
            Ok(found) => {
                // Backends may ignore the exclusion; identity equality decides.
                let conflicts = found
                    .iter()
                    .filter(|r| query.exclude != Some(r.id()))
                    .count();

                debug!(
                    resource_id = %query.resource_id,
                    date = %query.date,
                    start = %query.start,
                    end = %query.end,
                    conflicts,
                    "Booking conflict check"
                );

                conflicts > 0
            }
            Err(e) => {
                let verdict = BOOKING_CONFLICT_POLICY.conflict_verdict();

                error!(
                    resource_id = %query.resource_id,
                    date = %query.date,
                    error = %e,
                    verdict,
                    "Booking conflict check failed"
                );

                verdict
            }
        }
    }

    /// True only if `user_id` does not already own a team
    pub async fn can_create_team(&self, user_id: &UserId) -> bool {
        match self.teams.find_owned_by(user_id).await {
            Ok(None) => true,
            Ok(Some(membership)) => {
                debug!(
                    user_id = %user_id,
                    team_id = %membership.team_id,
                    "User already owns a team"
                );
                false
            }
            Err(e) if e.is_not_found() => true,
            Err(e) => {
                let verdict = TEAM_CREATION_POLICY.permission_verdict();

                warn!(
                    user_id = %user_id,
                    error = %e,
                    verdict,
                    "Team ownership lookup failed"
                );

                verdict
            }
        }
    }
}
