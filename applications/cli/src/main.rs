/// Easy Rider - command line client for the trip booking API
use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rider_client::{AppState, RiderClient};
use rider_core::{Role, TripId, UserId};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use config::CliConfig;

#[derive(Parser)]
#[command(name = "rider")]
#[command(about = "Easy Rider trip booking client", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./rider.toml when present)
    #[arg(long, global = true, env = "RIDER_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the signed-in account
    Whoami,
    /// Create a new account (no sign-in required)
    Signup {
        /// Email address
        #[arg(short, long)]
        email: String,
        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Manage user accounts (managers and admins only)
    Users {
        #[command(subcommand)]
        command: UserCommands,
    },
    /// Manage trips
    Trips {
        #[command(subcommand)]
        command: TripCommands,
    },
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// List the users you may manage
    List {
        /// Page number, starting at 1
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Show one user
    Show { id: UserId },
    /// Create a user
    Create {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
        /// USER, MANAGER or ADMIN (or 1, 2, 4)
        #[arg(short, long, default_value = "USER")]
        role: Role,
    },
    /// Change a user's email, role or password
    Update {
        id: UserId,
        #[arg(short, long)]
        email: Option<String>,
        #[arg(short, long)]
        role: Option<Role>,
        /// Setting a password replaces the whole record
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Delete a user
    Delete { id: UserId },
}

#[derive(Subcommand)]
pub enum TripCommands {
    /// List trips, optionally filtered on the server
    List {
        /// Owner of the trips (defaults to you)
        #[arg(short, long)]
        user: Option<UserId>,
        /// Page number, starting at 1
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Exact destination
        #[arg(long)]
        destination: Option<String>,
        /// Destination contains this text
        #[arg(long)]
        search: Option<String>,
        /// Only trips ending on or after this date
        #[arg(long, value_parser = parse_date_arg)]
        from: Option<NaiveDate>,
        /// Only trips starting on or before this date
        #[arg(long, value_parser = parse_date_arg)]
        to: Option<NaiveDate>,
    },
    /// Show one trip
    Show {
        id: TripId,
        #[arg(short, long)]
        user: Option<UserId>,
    },
    /// Book a trip
    Create {
        #[arg(short, long)]
        user: Option<UserId>,
        #[arg(short, long)]
        destination: String,
        /// Start date (YYYY-MM-DD)
        #[arg(short, long)]
        start: String,
        /// End date (YYYY-MM-DD)
        #[arg(short = 'n', long)]
        end: String,
        #[arg(short, long)]
        comment: Option<String>,
    },
    /// Change a trip
    Update {
        id: TripId,
        #[arg(short, long)]
        user: Option<UserId>,
        #[arg(short, long)]
        destination: Option<String>,
        #[arg(short, long, value_parser = parse_date_arg)]
        start: Option<NaiveDate>,
        #[arg(short = 'n', long, value_parser = parse_date_arg)]
        end: Option<NaiveDate>,
        #[arg(short, long)]
        comment: Option<String>,
    },
    /// Cancel a trip
    Delete {
        id: TripId,
        #[arg(short, long)]
        user: Option<UserId>,
    },
}

fn parse_date_arg(value: &str) -> Result<NaiveDate, rider_core::RiderError> {
    rider_core::date::parse_date(value)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rider=info,rider_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = CliConfig::load(cli.config.as_deref())?;
    config.validate()?;

    let client = RiderClient::with_timeout(config.client_config(), config.timeout())
        .context("Failed to create API client")?;
    tracing::info!(url = %client.url().await, "Using Easy Rider API");

    let app = AppState::new(client, config.preferences(), config.guard());

    let result = match cli.command {
        Commands::Signup { email, password } => {
            tracing::info!(command = "signup", "Running command");
            commands::sign_up(&app, &email, &password).await
        }
        Commands::Whoami => {
            sign_in(&app, &config).await?;
            tracing::info!(command = "whoami", "Running command");
            commands::whoami(&app).await
        }
        Commands::Users { command } => {
            sign_in(&app, &config).await?;
            tracing::info!(command = "users", "Running command");
            commands::users(&app, command).await
        }
        Commands::Trips { command } => {
            sign_in(&app, &config).await?;
            tracing::info!(command = "trips", "Running command");
            commands::trips(&app, command).await
        }
    };

    if app.session().await.is_logged_in() {
        app.sign_out().await;
    }
    result
}

/// Sign in with the configured credentials
async fn sign_in(app: &AppState, config: &CliConfig) -> anyhow::Result<()> {
    let (email, password) = config.require_credentials()?;
    app.sign_in(email, password)
        .await
        .with_context(|| format!("Failed to sign in as {}", email))?;
    Ok(())
}
