//! Runtime selection of the repository backend

use std::sync::Arc;

use tracing::info;

use crate::domain::reservation::ReservationRepository;
use crate::domain::team::TeamRepository;
use crate::domain::DomainError;
use crate::infrastructure::reservation::{
    InMemoryReservationRepository, PostgresReservationRepository,
};
use crate::infrastructure::team::{InMemoryTeamRepository, PostgresTeamRepository};

use super::migrations::run_migrations;
use super::postgres::{connect_pool, PostgresConfig};

/// Supported storage types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    /// In-memory storage (for testing/development)
    InMemory,
    /// PostgreSQL storage
    Postgres,
}

impl std::str::FromStr for StorageType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Ok(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            other => Err(DomainError::configuration(format!(
                "Unknown storage backend '{}'",
                other
            ))),
        }
    }
}

/// The repositories the services run on
#[derive(Clone)]
pub struct Repositories {
    pub reservations: Arc<dyn ReservationRepository>,
    pub teams: Arc<dyn TeamRepository>,
}

impl Repositories {
    /// Fresh in-memory repositories
    pub fn in_memory() -> Self {
        Self {
            reservations: Arc::new(InMemoryReservationRepository::new()),
            teams: Arc::new(InMemoryTeamRepository::new()),
        }
    }

    /// PostgreSQL repositories sharing one pool
    pub async fn postgres(config: &PostgresConfig, migrate: bool) -> Result<Self, DomainError> {
        let pool = connect_pool(config).await?;

        if migrate {
            run_migrations(&pool).await?;
        }

        Ok(Self {
            reservations: Arc::new(PostgresReservationRepository::new(pool.clone())),
            teams: Arc::new(PostgresTeamRepository::new(pool)),
        })
    }

    /// Build repositories for the configured backend
    pub async fn create(
        storage_type: StorageType,
        postgres: &PostgresConfig,
        migrate: bool,
    ) -> Result<Self, DomainError> {
        info!(backend = ?storage_type, "Initializing storage");

        match storage_type {
            StorageType::InMemory => Ok(Self::in_memory()),
            StorageType::Postgres => Self::postgres(postgres, migrate).await,
        }
    }
}
