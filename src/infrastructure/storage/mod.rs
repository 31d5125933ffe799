//! Storage infrastructure - connection pool, migrations and repository wiring

mod factory;
pub mod migrations;
mod postgres;

pub use factory::{Repositories, StorageType};
pub use migrations::{
    revert_last_migration, run_migrations, schema_migrations, Migration, PostgresMigrator,
};
pub use postgres::{connect_pool, PostgresConfig};
