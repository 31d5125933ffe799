//! Team repository trait

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use super::entity::{Team, TeamId, TeamMembership};
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Repository for teams and memberships held by the external store
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// The owner membership of `user_id`, if any.
    ///
    /// A missing row is `Ok(None)`. Backends that report absence as
    /// [`DomainError::NotFound`] are tolerated by callers as well.
    async fn find_owned_by(&self, user_id: &UserId) -> Result<Option<TeamMembership>, DomainError>;

    /// Get a team by ID
    async fn get(&self, id: &TeamId) -> Result<Option<Team>, DomainError>;

    /// Insert a team together with its owner membership
    async fn create(&self, team: Team) -> Result<Team, DomainError>;

    /// Every membership held by a user
    async fn memberships_of(&self, user_id: &UserId) -> Result<Vec<TeamMembership>, DomainError>;
}
