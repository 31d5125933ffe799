//! Team service for team creation

use std::sync::Arc;

use tracing::info;

use crate::domain::eligibility::EligibilityChecker;
use crate::domain::team::{Team, TeamMembership, TeamRepository};
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Request for creating a new team
#[derive(Debug, Clone)]
pub struct CreateTeamRequest {
    pub name: String,
    pub description: Option<String>,
}

/// Team service for managing teams
#[derive(Clone)]
pub struct TeamService {
    repository: Arc<dyn TeamRepository>,
    checker: EligibilityChecker,
}

impl TeamService {
    /// Create a new team service
    pub fn new(repository: Arc<dyn TeamRepository>, checker: EligibilityChecker) -> Self {
        Self {
            repository,
            checker,
        }
    }

    /// Whether `user_id` may create a team right now
    pub async fn can_create(&self, user_id: &UserId) -> bool {
        self.checker.can_create_team(user_id).await
    }

    /// Create a team owned by `owner`
    pub async fn create(&self, owner: &UserId, request: CreateTeamRequest) -> Result<Team, DomainError> {
        info!(owner = %owner, name = %request.name, "Creating team");

        let mut team = Team::new(&request.name, owner.clone())
            .map_err(|e| DomainError::validation(e.to_string()))?;

        if let Some(desc) = request.description.filter(|d| !d.trim().is_empty()) {
            team = team
                .with_description(desc)
                .map_err(|e| DomainError::validation(e.to_string()))?;
        }

        if !self.checker.can_create_team(owner).await {
            return Err(DomainError::conflict(format!(
                "User '{}' already owns a team or ownership could not be verified",
                owner
            )));
        }

        self.repository.create(team).await
    }

    /// The team owned by `user_id`, if any
    pub async fn owned_by(&self, user_id: &UserId) -> Result<Option<Team>, DomainError> {
        match self.repository.find_owned_by(user_id).await? {
            Some(membership) => self.repository.get(&membership.team_id).await,
            None => Ok(None),
        }
    }

    /// Teams `user_id` belongs to, in any role
    pub async fn memberships(&self, user_id: &UserId) -> Result<Vec<TeamMembership>, DomainError> {
        self.repository.memberships_of(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::reservation::MockReservationRepository;
    use crate::domain::team::MockTeamRepository;
    use crate::infrastructure::team::InMemoryTeamRepository;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn service_over(repo: Arc<dyn TeamRepository>) -> TeamService {
        let checker = EligibilityChecker::new(Arc::new(MockReservationRepository::new()), repo.clone());
        TeamService::new(repo, checker)
    }

    fn request(name: &str) -> CreateTeamRequest {
        CreateTeamRequest {
            name: name.to_string(),
            description: None,
        }
    }

    #[tokio::test]
    async fn test_create_team() {
        let service = service_over(Arc::new(InMemoryTeamRepository::new()));

        assert!(service.can_create(&user("user-1")).await);

        let team = service.create(&user("user-1"), request("Net Rushers")).await.unwrap();
        assert_eq!(team.name(), "Net Rushers");

        let owned = service.owned_by(&user("user-1")).await.unwrap().unwrap();
        assert_eq!(owned.id(), team.id());

        let memberships = service.memberships(&user("user-1")).await.unwrap();
        assert_eq!(memberships.len(), 1);
        assert!(memberships[0].is_owner());
    }

    #[tokio::test]
    async fn test_second_team_rejected() {
        let service = service_over(Arc::new(InMemoryTeamRepository::new()));

        service.create(&user("user-1"), request("Net Rushers")).await.unwrap();
        assert!(!service.can_create(&user("user-1")).await);

        let result = service.create(&user("user-1"), request("Baseline Crew")).await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_other_users_unaffected() {
        let service = service_over(Arc::new(InMemoryTeamRepository::new()));

        service.create(&user("user-1"), request("Net Rushers")).await.unwrap();
        assert!(service.create(&user("user-2"), request("Baseline Crew")).await.is_ok());
    }

    #[tokio::test]
    async fn test_invalid_name_rejected() {
        let service = service_over(Arc::new(InMemoryTeamRepository::new()));

        let result = service.create(&user("user-1"), request("")).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_lookup_failure_blocks_creation() {
        let mut repo = MockTeamRepository::new();
        repo.expect_find_owned_by()
            .returning(|_| Err(DomainError::storage("connection refused")));
        repo.expect_create().never();

        let service = service_over(Arc::new(repo));
        let result = service.create(&user("user-1"), request("Net Rushers")).await;

        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_store_rejects_owner_that_passed_a_stale_check() {
        let store = Arc::new(InMemoryTeamRepository::new());
        store
            .create(Team::new("Net Rushers", user("user-1")).unwrap())
            .await
            .unwrap();

        // Eligibility was read before the first team landed
        let mut stale = MockTeamRepository::new();
        stale.expect_find_owned_by().returning(|_| Ok(None));
        let checker =
            EligibilityChecker::new(Arc::new(MockReservationRepository::new()), Arc::new(stale));
        let service = TeamService::new(store.clone(), checker);

        let result = service.create(&user("user-1"), request("Baseline Crew")).await;

        assert!(matches!(result, Err(DomainError::Conflict { .. })));
        assert_eq!(store.memberships_of(&user("user-1")).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_owned_by_none() {
        let service = service_over(Arc::new(InMemoryTeamRepository::new()));
        assert!(service.owned_by(&user("user-1")).await.unwrap().is_none());
    }
}
