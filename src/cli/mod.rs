//! Command line interface
//!
//! - `serve`: run the HTTP API
//! - `migrate`: apply, inspect or revert the database schema

pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

/// Courtly - court reservations and teams
#[derive(Parser)]
#[command(name = "courtly")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the API server
    Serve,

    /// Manage database schema migrations
    Migrate(migrate::MigrateArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["courtly", "serve"]).unwrap();
        assert!(matches!(cli.command, Command::Serve));
    }

    #[test]
    fn test_parse_migrate_revert() {
        let cli = Cli::try_parse_from(["courtly", "migrate", "--revert"]).unwrap();

        match cli.command {
            Command::Migrate(args) => {
                assert!(args.revert);
                assert!(!args.status);
            }
            _ => panic!("expected migrate"),
        }
    }

    #[test]
    fn test_migrate_flags_conflict() {
        assert!(Cli::try_parse_from(["courtly", "migrate", "--revert", "--status"]).is_err());
    }
}
