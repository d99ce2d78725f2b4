//! Inventory Management System CLI - database setup and credential tools.
//!
//! # Usage
//!
//! ```bash
//! # Create the database file with schema and sample data
//! ims-cli init
//!
//! # Create the database file with the schema only
//! ims-cli init --no-seed
//!
//! # Add an employee who can log in to the web app
//! ims-cli employee add --username jdoe --pin 4821
//!
//! # List employees
//! ims-cli employee list
//! ```
//!
//! The database location comes from `IMS_DATABASE_PATH` (see the web app
//! configuration) unless `--database` is given.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "ims-cli")]
#[command(author, version, about = "Inventory management CLI tools")]
struct Cli {
    /// Database file (overrides `IMS_DATABASE_PATH`)
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database if it does not exist
    Init {
        /// Create the schema without sample data
        #[arg(long)]
        no_seed: bool,
    },
    /// Manage employee credentials
    Employee {
        #[command(subcommand)]
        action: EmployeeAction,
    },
}

#[derive(Subcommand)]
enum EmployeeAction {
    /// Add an employee credential
    Add {
        /// Login name
        #[arg(short, long)]
        username: String,

        /// Numeric pin (1 to 9 digits)
        #[arg(short, long)]
        pin: String,
    },
    /// List employee credentials
    List,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    let database = commands::database_path(cli.database)?;

    match cli.command {
        Commands::Init { no_seed } => commands::init::run(&database, !no_seed).await?,
        Commands::Employee { action } => match action {
            EmployeeAction::Add { username, pin } => {
                commands::employee::add(&database, &username, pin).await?;
            }
            EmployeeAction::List => commands::employee::list(&database).await?,
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_init_no_seed() {
        let cli = Cli::try_parse_from(["ims-cli", "init", "--no-seed"]).unwrap_or_else(|e| {
            panic!("failed to parse: {e}");
        });
        assert!(matches!(cli.command, Commands::Init { no_seed: true }));
        assert!(cli.database.is_none());
    }

    #[test]
    fn test_parse_employee_add_with_database() {
        let cli = Cli::try_parse_from([
            "ims-cli",
            "employee",
            "add",
            "--username",
            "jdoe",
            "--pin",
            "4821",
            "--database",
            "/tmp/ims.db",
        ])
        .unwrap_or_else(|e| panic!("failed to parse: {e}"));

        assert_eq!(cli.database, Some(PathBuf::from("/tmp/ims.db")));
        match cli.command {
            Commands::Employee {
                action: EmployeeAction::Add { username, pin },
            } => {
                assert_eq!(username, "jdoe");
                assert_eq!(pin, "4821");
            }
            _ => panic!("expected employee add"),
        }
    }
}
