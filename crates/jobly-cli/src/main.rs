use clap::{Parser, Subcommand};
use dotenvy::dotenv;

use jobly_auth::create_token;
use jobly_config::JwtConfig;
use jobly_db::{init_db_pool, run_migrations};

#[derive(Parser)]
#[command(name = "jobly-cli")]
#[command(about = "Jobly CLI - Administrative tools for Jobly", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a signed bearer token for a user
    IssueToken {
        /// Username to embed in the token
        #[arg(short = 'u', long)]
        username: String,

        /// Grant admin rights
        #[arg(long)]
        admin: bool,
    },
    /// Apply pending database migrations
    Migrate,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::IssueToken { username, admin } => {
            match create_token(&username, admin, &JwtConfig::from_env()) {
                Ok(token) => println!("{}", token),
                Err(e) => {
                    eprintln!("❌ Error issuing token: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Migrate => {
            let pool = init_db_pool().await;

            match run_migrations(&pool).await {
                Ok(()) => println!("✅ Migrations applied"),
                Err(e) => {
                    eprintln!("❌ Error running migrations: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_issue_token_args() {
        let cli = Cli::parse_from(["jobly-cli", "issue-token", "--username", "u1", "--admin"]);
        match cli.command {
            Commands::IssueToken { username, admin } => {
                assert_eq!(username, "u1");
                assert!(admin);
            }
            Commands::Migrate => panic!("expected issue-token"),
        }
    }
}
