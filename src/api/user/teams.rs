//! Team endpoints

use axum::{extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::team::{Team, TeamMembership};
use crate::infrastructure::team::CreateTeamRequest;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTeamApiRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamResponse {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub owner_id: String,
    pub created_at: String,
}

impl From<&Team> for TeamResponse {
    fn from(team: &Team) -> Self {
        Self {
            id: team.id().to_string(),
            name: team.name().to_string(),
            description: team.description().map(String::from),
            owner_id: team.owner_id().to_string(),
            created_at: team.created_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembershipResponse {
    pub team_id: String,
    pub role: String,
    pub joined_at: String,
}

impl From<&TeamMembership> for MembershipResponse {
    fn from(membership: &TeamMembership) -> Self {
        Self {
            team_id: membership.team_id.to_string(),
            role: membership.role.to_string(),
            joined_at: membership.joined_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListMembershipsResponse {
    pub memberships: Vec<MembershipResponse>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamEligibilityResponse {
    pub can_create_team: bool,
}

/// GET /api/teams/eligibility
///
/// `false` also when ownership could not be verified.
pub async fn team_eligibility(
    State(state): State<AppState>,
    RequireUser(actor): RequireUser,
) -> Json<TeamEligibilityResponse> {
    let can_create_team = state.team_service.can_create(&actor.user_id).await;

    debug!(user_id = %actor.user_id, can_create_team, "Team eligibility checked");

    Json(TeamEligibilityResponse { can_create_team })
}

/// POST /api/teams
pub async fn create_team(
    State(state): State<AppState>,
    RequireUser(actor): RequireUser,
    Json(request): Json<CreateTeamApiRequest>,
) -> Result<(StatusCode, Json<TeamResponse>), ApiError> {
    let team = state
        .team_service
        .create(
            &actor.user_id,
            CreateTeamRequest {
                name: request.name,
                description: request.description,
            },
        )
        .await
        .map_err(ApiError::from)?;

    Ok((StatusCode::CREATED, Json(TeamResponse::from(&team))))
}

/// GET /api/teams/owned
pub async fn owned_team(
    State(state): State<AppState>,
    RequireUser(actor): RequireUser,
) -> Result<Json<TeamResponse>, ApiError> {
    let team = state
        .team_service
        .owned_by(&actor.user_id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("You do not own a team"))?;

    Ok(Json(TeamResponse::from(&team)))
}

/// GET /api/teams/memberships
pub async fn list_memberships(
    State(state): State<AppState>,
    RequireUser(actor): RequireUser,
) -> Result<Json<ListMembershipsResponse>, ApiError> {
    let memberships: Vec<MembershipResponse> = state
        .team_service
        .memberships(&actor.user_id)
        .await
        .map_err(ApiError::from)?
        .iter()
        .map(MembershipResponse::from)
        .collect();
    let total = memberships.len();

    Ok(Json(ListMembershipsResponse { memberships, total }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::UserId;

    #[test]
    fn test_team_response_from_team() {
        let team = Team::new("  Net Rushers ", UserId::new("user-1").unwrap()).unwrap();
        let response = TeamResponse::from(&team);

        assert_eq!(response.name, "Net Rushers");
        assert_eq!(response.owner_id, "user-1");
        assert!(response.description.is_none());
    }

    #[test]
    fn test_eligibility_shape() {
        let json = serde_json::to_string(&TeamEligibilityResponse {
            can_create_team: false,
        })
        .unwrap();

        assert_eq!(json, r#"{"can_create_team":false}"#);
    }
}
