use clap::{Parser, Subcommand};
use sea_orm_migration::MigratorTrait;
use tally::{Server, DB};

use tally_app::middleware::LoggingMiddleware;
use tally_app::migrations::Migrator;
use tally_app::{bootstrap, routes};

#[derive(Parser)]
#[command(name = "tally", version, about = "Todo search backend")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP server
    Serve {
        /// Overrides SERVER_HOST
        #[arg(long)]
        host: Option<String>,
        /// Overrides SERVER_PORT
        #[arg(long)]
        port: Option<u16>,
    },
    /// Manage the database schema
    Migrate {
        #[command(subcommand)]
        action: Option<MigrateAction>,
    },
}

#[derive(Subcommand, Clone, Copy)]
enum MigrateAction {
    /// Apply all pending migrations (default)
    Up,
    /// Roll back the last `steps` migrations
    Down {
        #[arg(default_value_t = 1)]
        steps: u32,
    },
    /// List applied and pending migrations
    Status,
    /// Drop every table and migrate from scratch
    Fresh,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();
    bootstrap::boot(&std::env::current_dir()?).await?;

    match cli.command {
        Command::Serve { host, port } => {
            let mut server = Server::from_config(routes::router()).middleware(LoggingMiddleware);
            if let Some(host) = host {
                server = server.host(&host);
            }
            if let Some(port) = port {
                server = server.port(port);
            }
            server.run().await?;
        }
        Command::Migrate { action } => {
            let conn = DB::connection()?;
            let db = conn.inner();
            match action.unwrap_or(MigrateAction::Up) {
                MigrateAction::Up => {
                    Migrator::up(db, None).await?;
                    tracing::info!("migrations applied");
                }
                MigrateAction::Down { steps } => {
                    Migrator::down(db, Some(steps)).await?;
                    tracing::info!(steps, "migrations rolled back");
                }
                MigrateAction::Status => Migrator::status(db).await?,
                MigrateAction::Fresh => {
                    tracing::warn!("dropping all tables");
                    Migrator::fresh(db).await?;
                    tracing::info!("database rebuilt");
                }
            }
        }
    }

    Ok(())
}
