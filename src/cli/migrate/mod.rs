//! Migrate command - applies the schema to the configured database

use clap::Args;
use tracing::info;

use crate::config::AppConfig;
use crate::infrastructure::logging;
use crate::infrastructure::storage::{
    connect_pool, revert_last_migration, run_migrations, schema_migrations, PostgresMigrator,
};

#[derive(Args, Debug, Default)]
pub struct MigrateArgs {
    /// Revert the most recently applied migration
    #[arg(long, conflicts_with = "status")]
    pub revert: bool,

    /// List migrations and whether they are applied
    #[arg(long)]
    pub status: bool,
}

pub async fn run(args: MigrateArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&config.logging);

    let postgres = config
        .database
        .to_postgres_config()
        .ok_or_else(|| anyhow::anyhow!("database.url or DATABASE_URL is required"))?;
    let pool = connect_pool(&postgres).await?;

    if args.status {
        let applied = PostgresMigrator::new(pool).applied_versions().await?;

        for migration in schema_migrations() {
            let mark = if applied.contains(&migration.version) {
                "applied"
            } else {
                "pending"
            };
            println!("{:>4}  {:<8}  {}", migration.version, mark, migration.description);
        }
    } else if args.revert {
        match revert_last_migration(&pool).await? {
            Some(version) => info!(version, "Migration reverted"),
            None => info!("No migrations to revert"),
        }
    } else {
        run_migrations(&pool).await?;
    }

    Ok(())
}
