//! PostgreSQL team repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::team::{Team, TeamId, TeamMembership, TeamRepository, TeamRole};
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// PostgreSQL implementation of TeamRepository
#[derive(Debug, Clone)]
pub struct PostgresTeamRepository {
    pool: PgPool,
}

impl PostgresTeamRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeamRepository for PostgresTeamRepository {
    async fn find_owned_by(&self, user_id: &UserId) -> Result<Option<TeamMembership>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT team_id, user_id, role, joined_at
            FROM team_members
            WHERE user_id = $1 AND role = 'owner'
            LIMIT 1
            "#,
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to look up team ownership: {}", e)))?;

        match row {
            Some(row) => Ok(Some(row_to_membership(&row)?)),
            None => Ok(None),
        }
    }

    async fn get(&self, id: &TeamId) -> Result<Option<Team>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, description, owner_id, created_at
            FROM teams
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get team: {}", e)))?;

        match row {
            Some(row) => Ok(Some(row_to_team(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, team: Team) -> Result<Team, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to begin transaction: {}", e)))?;

        sqlx::query(
            r#"
            INSERT INTO teams (id, name, description, owner_id, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(team.id().as_uuid())
        .bind(team.name())
        .bind(team.description())
        .bind(team.owner_id().as_str())
        .bind(team.created_at())
        .execute(&mut *tx)
        .await
        .map_err(|e| map_insert_error(e, &team))?;

        let owner = team.owner_membership();

        sqlx::query(
            r#"
            INSERT INTO team_members (team_id, user_id, role, joined_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(owner.team_id.as_uuid())
        .bind(owner.user_id.as_str())
        .bind(owner.role.as_str())
        .bind(owner.joined_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_insert_error(e, &team))?;

        tx.commit()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to commit team: {}", e)))?;

        Ok(team)
    }

    async fn memberships_of(&self, user_id: &UserId) -> Result<Vec<TeamMembership>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT team_id, user_id, role, joined_at
            FROM team_members
            WHERE user_id = $1
            ORDER BY joined_at
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list memberships: {}", e)))?;

        rows.iter().map(row_to_membership).collect()
    }
}

fn map_insert_error(e: sqlx::Error, team: &Team) -> DomainError {
    let msg = e.to_string();

    if msg.contains("duplicate key") || msg.contains("unique constraint") {
        if msg.contains("team_members_one_owner") {
            DomainError::conflict(format!(
                "User '{}' already owns a team",
                team.owner_id()
            ))
        } else {
            DomainError::conflict(format!("Team '{}' already exists", team.id()))
        }
    } else {
        DomainError::storage(format!("Failed to create team: {}", e))
    }
}

fn row_to_team(row: &sqlx::postgres::PgRow) -> Result<Team, DomainError> {
    let id: Uuid = row.get("id");
    let name: String = row.get("name");
    let description: Option<String> = row.get("description");
    let owner_id: String = row.get("owner_id");
    let created_at: DateTime<Utc> = row.get("created_at");

    let owner_id = UserId::new(owner_id)
        .map_err(|e| DomainError::storage(format!("Invalid owner ID in database: {}", e)))?;

    Ok(Team::restore(
        TeamId::from(id),
        name,
        description,
        owner_id,
        created_at,
    ))
}

fn row_to_membership(row: &sqlx::postgres::PgRow) -> Result<TeamMembership, DomainError> {
    let team_id: Uuid = row.get("team_id");
    let user_id: String = row.get("user_id");
    let role: String = row.get("role");
    let joined_at: DateTime<Utc> = row.get("joined_at");

    let user_id = UserId::new(user_id)
        .map_err(|e| DomainError::storage(format!("Invalid user ID in database: {}", e)))?;
    let role: TeamRole = role
        .parse()
        .map_err(|e| DomainError::storage(format!("Invalid team role in database: {}", e)))?;

    Ok(TeamMembership {
        team_id: TeamId::from(team_id),
        user_id,
        role,
        joined_at,
    })
}
