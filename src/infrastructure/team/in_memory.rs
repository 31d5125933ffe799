//! In-memory team repository

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::team::{Team, TeamId, TeamMembership, TeamRepository};
use crate::domain::user::UserId;
use crate::domain::DomainError;

#[derive(Debug, Default)]
struct TeamTables {
    teams: HashMap<TeamId, Team>,
    members: Vec<TeamMembership>,
}

impl TeamTables {
    /// At most one owner row per user, same as the unique index in Postgres
    fn owned_by(&self, user_id: &UserId) -> Option<&TeamMembership> {
        self.members
            .iter()
            .find(|m| &m.user_id == user_id && m.is_owner())
    }
}

/// Thread-safe in-memory team store
#[derive(Debug, Default)]
pub struct InMemoryTeamRepository {
    tables: RwLock<TeamTables>,
}

impl InMemoryTeamRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a membership row directly, bypassing team creation
    pub fn insert_membership(&self, membership: TeamMembership) -> Result<(), DomainError> {
        let mut tables = self
            .tables
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))?;

        if membership.is_owner() && tables.owned_by(&membership.user_id).is_some() {
            return Err(DomainError::conflict(format!(
                "User '{}' already owns a team",
                membership.user_id
            )));
        }

        tables.members.push(membership);
        Ok(())
    }
}

#[async_trait]
impl TeamRepository for InMemoryTeamRepository {
    async fn find_owned_by(&self, user_id: &UserId) -> Result<Option<TeamMembership>, DomainError> {
        let tables = self
            .tables
            .read()
            .map_err(|e| DomainError::storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(tables.owned_by(user_id).cloned())
    }

    async fn get(&self, id: &TeamId) -> Result<Option<Team>, DomainError> {
        let tables = self
            .tables
            .read()
            .map_err(|e| DomainError::storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(tables.teams.get(id).cloned())
    }

    async fn create(&self, team: Team) -> Result<Team, DomainError> {
        let mut tables = self
            .tables
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))?;

        if tables.teams.contains_key(&team.id()) {
            return Err(DomainError::conflict(format!(
                "Team '{}' already exists",
                team.id()
            )));
        }

        if let Some(owned) = tables.owned_by(team.owner_id()) {
            return Err(DomainError::conflict(format!(
                "User '{}' already owns team '{}'",
                team.owner_id(),
                owned.team_id
            )));
        }

        tables.members.push(team.owner_membership());
        tables.teams.insert(team.id(), team.clone());
        Ok(team)
    }

    async fn memberships_of(&self, user_id: &UserId) -> Result<Vec<TeamMembership>, DomainError> {
        let tables = self
            .tables
            .read()
            .map_err(|e| DomainError::storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(tables
            .members
            .iter()
            .filter(|m| &m.user_id == user_id)
            .cloned()
            .collect())
    }
}
