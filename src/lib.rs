//! Courtly booking backend
//!
//! Court reservations and team creation for a sports-venue platform, with:
//! - Double-booking detection that fails safe when the store cannot answer
//! - A one-team-per-owner rule that fails closed on lookup errors
//! - PostgreSQL or in-memory storage

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use crate::config::AppConfig;

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use api::state::AppState;
use infrastructure::auth::{JwtConfig, JwtService};
use infrastructure::storage::{PostgresConfig, Repositories, StorageType};

/// Create the application state with configuration loaded from the environment
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::load()?).await
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let storage_type: StorageType = config.storage.backend.parse()?;

    let postgres = match (storage_type, config.database.to_postgres_config()) {
        (_, Some(postgres)) => postgres,
        (StorageType::Postgres, None) => {
            anyhow::bail!("database.url or DATABASE_URL is required for the postgres backend")
        }
        (StorageType::InMemory, None) => PostgresConfig::default(),
    };

    let repositories =
        Repositories::create(storage_type, &postgres, config.storage.run_migrations)
            .await
            .context("Failed to initialize storage")?;

    let jwt = JwtConfig::new(&config.auth.jwt_secret)
        .with_audience(config.auth.audience.clone())
        .with_leeway(config.auth.leeway_secs);
    let verifier = JwtService::new(&jwt).context("Failed to configure token verification")?;

    info!(backend = ?storage_type, "Application state ready");

    Ok(AppState::new(repositories, Arc::new(verifier)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_state() {
        let mut config = AppConfig::default();
        config.storage.backend = "memory".to_string();
        config.auth.jwt_secret = "secret".to_string();

        let state = create_app_state_with_config(&config).await.unwrap();
        assert!(state.reservation_service.ping().await.is_ok());
    }

    #[tokio::test]
    async fn test_missing_secret_rejected() {
        let mut config = AppConfig::default();
        config.storage.backend = "memory".to_string();

        assert!(create_app_state_with_config(&config).await.is_err());
    }

    #[tokio::test]
    async fn test_unknown_backend_rejected() {
        let mut config = AppConfig::default();
        config.storage.backend = "sqlite".to_string();
        config.auth.jwt_secret = "secret".to_string();

        assert!(create_app_state_with_config(&config).await.is_err());
    }
}
