//! Team entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::{validate_team_description, validate_team_name, TeamValidationError};
use crate::domain::user::UserId;

/// Team identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(Uuid);

impl TeamId {
    /// Generate a fresh identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for TeamId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role of a user within a team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TeamRole {
    /// Created the team; at most one owned team per user
    Owner,
    Admin,
    /// Regular team member
    #[default]
    Member,
}

impl TeamRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::Member => "member",
        }
    }
}

impl std::str::FromStr for TeamRole {
    type Err = TeamValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "owner" => Ok(Self::Owner),
            "admin" => Ok(Self::Admin),
            "member" => Ok(Self::Member),
            other => Err(TeamValidationError::UnknownRole(other.to_string())),
        }
    }
}

impl std::fmt::Display for TeamRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Team entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    /// Unique identifier
    id: TeamId,
    /// Display name
    name: String,
    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    /// User who created and owns the team
    owner_id: UserId,
    /// Creation timestamp
    created_at: DateTime<Utc>,
}

impl Team {
    /// Create a new team owned by `owner_id`
    pub fn new(name: impl Into<String>, owner_id: UserId) -> Result<Self, TeamValidationError> {
        let name = name.into();
        validate_team_name(&name)?;

        Ok(Self {
            id: TeamId::generate(),
            name: name.trim().to_string(),
            description: None,
            owner_id,
            created_at: Utc::now(),
        })
    }

    /// Rebuild a team from a stored row
    pub fn restore(
        id: TeamId,
        name: String,
        description: Option<String>,
        owner_id: UserId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            description,
            owner_id,
            created_at,
        }
    }

    /// Set description (builder pattern)
    pub fn with_description(
        mut self,
        description: impl Into<String>,
    ) -> Result<Self, TeamValidationError> {
        let description = description.into();
        validate_team_description(&description)?;
        self.description = Some(description);
        Ok(self)
    }

    // Getters

    pub fn id(&self) -> TeamId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn owner_id(&self) -> &UserId {
        &self.owner_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Membership row recording the owner
    pub fn owner_membership(&self) -> TeamMembership {
        TeamMembership {
            team_id: self.id,
            user_id: self.owner_id.clone(),
            role: TeamRole::Owner,
            joined_at: self.created_at,
        }
    }
}

/// A user's membership in a team
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMembership {
    pub team_id: TeamId,
    pub user_id: UserId,
    pub role: TeamRole,
    pub joined_at: DateTime<Utc>,
}

impl TeamMembership {
    pub fn is_owner(&self) -> bool {
        self.role == TeamRole::Owner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> UserId {
        UserId::new("user-1").unwrap()
    }

    #[test]
    fn test_team_id_round_trips_through_uuid() {
        let id = TeamId::generate();
        assert_eq!(TeamId::from(*id.as_uuid()), id);
    }

    #[test]
    fn test_team_role_parse() {
        assert_eq!("owner".parse::<TeamRole>().unwrap(), TeamRole::Owner);
        assert_eq!("admin".parse::<TeamRole>().unwrap(), TeamRole::Admin);
        assert_eq!("member".parse::<TeamRole>().unwrap(), TeamRole::Member);
        assert!("captain".parse::<TeamRole>().is_err());
    }

    #[test]
    fn test_team_creation() {
        let team = Team::new("  Net Rushers ", owner()).unwrap();

        assert_eq!(team.name(), "Net Rushers");
        assert!(team.description().is_none());
        assert_eq!(team.owner_id().as_str(), "user-1");
    }

    #[test]
    fn test_team_invalid_name() {
        assert!(Team::new("", owner()).is_err());
    }

    #[test]
    fn test_team_with_description() {
        let team = Team::new("Net Rushers", owner())
            .unwrap()
            .with_description("Tuesday doubles")
            .unwrap();

        assert_eq!(team.description(), Some("Tuesday doubles"));
    }

    #[test]
    fn test_owner_membership() {
        let team = Team::new("Net Rushers", owner()).unwrap();
        let membership = team.owner_membership();

        assert_eq!(membership.team_id, team.id());
        assert_eq!(membership.user_id, owner());
        assert!(membership.is_owner());
    }
}
