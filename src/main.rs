//! Clinic Queue - service binary.

#![forbid(unsafe_code)]

use std::error::Error;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use clinic_queue::adapters::MemoryDatabaseAdapter;
use clinic_queue::handlers::AxumIntegration;
use clinic_queue::services::{ProvisionAdminRequest, QueueSnapshotResponse};
use clinic_queue::{
    ClinicConfig, ClinicQueue, ClinicQueueBuilder, DatabaseAdapter, StorageBackend,
};

#[derive(Parser)]
#[command(name = "clinic-queue")]
#[command(version, about = "Clinic queue management backend")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve {
        /// Socket address to bind to. Overrides `CLINIC_QUEUE_BIND`.
        #[arg(long)]
        bind: Option<String>,
    },

    /// Create the bootstrap super admin, or reset its password
    #[command(name = "provision-admin")]
    ProvisionAdmin {
        #[arg(long, env = "CLINIC_QUEUE_ADMIN_EMAIL")]
        email: String,

        #[arg(long, env = "CLINIC_QUEUE_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Print the active queue of a clinic as JSON
    #[command(name = "view-turns")]
    ViewTurns {
        /// Public slug of the clinic
        slug: String,
    },

    /// Apply the embedded schema migrations (Postgres only)
    Migrate,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Serve { bind: None });

    let mut config = ClinicConfig::from_env()?;
    if let Commands::Serve { bind: Some(bind) } = &command {
        config = config.bind_addr(bind.clone());
    }

    let backend = StorageBackend::select(&config)?;
    match &command {
        Commands::Serve { .. } => {}
        Commands::ProvisionAdmin { .. } => backend.require_persistent("provision-admin")?,
        Commands::ViewTurns { .. } => backend.require_persistent("view-turns")?,
        Commands::Migrate => backend.require_persistent("migrate")?,
    }

    match backend {
        #[cfg(feature = "sqlx-postgres")]
        StorageBackend::Postgres(database_url) => {
            run_postgres(command, config, &database_url).await
        }
        #[cfg(not(feature = "sqlx-postgres"))]
        StorageBackend::Postgres(_) => Err("this build has no Postgres support".into()),
        StorageBackend::Memory => {
            tracing::warn!("DATABASE_URL not set, serving from the in-memory adapter");
            let queue = ClinicQueueBuilder::new(config)
                .database(MemoryDatabaseAdapter::new())
                .build()?;
            run(command, &queue).await
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[cfg(feature = "sqlx-postgres")]
async fn run_postgres(
    command: Commands,
    config: ClinicConfig,
    database_url: &str,
) -> Result<(), Box<dyn Error>> {
    use clinic_queue::adapters::SqlxAdapter;

    let pool = config.pool.clone();
    let queue = ClinicQueueBuilder::new(config)
        .connect(SqlxAdapter::with_config(database_url, pool))
        .await
        .build()?;

    if let Ok(db) = queue.database() {
        let stats = db.pool_stats();
        tracing::info!(size = stats.size, idle = stats.idle, "Connected to Postgres");
    }

    let result = match command {
        Commands::Migrate => migrate(&queue).await,
        command => run(command, &queue).await,
    };

    if let Ok(db) = queue.database() {
        db.close().await;
    }
    result
}

#[cfg(feature = "sqlx-postgres")]
async fn migrate(
    queue: &ClinicQueue<clinic_queue::adapters::SqlxAdapter>,
) -> Result<(), Box<dyn Error>> {
    queue.database()?.migrate().await?;
    tracing::info!("Migrations applied");
    Ok(())
}

async fn run<DB: DatabaseAdapter>(
    command: Commands,
    queue: &ClinicQueue<DB>,
) -> Result<(), Box<dyn Error>> {
    match command {
        Commands::Serve { .. } => serve(queue).await,
        Commands::ProvisionAdmin { email, password } => {
            let response = queue
                .provision_admin(&ProvisionAdminRequest { email, password })
                .await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
        Commands::ViewTurns { slug } => {
            let turns = queue.queue_snapshot(&slug).await?;
            let response = QueueSnapshotResponse { turns };
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
        Commands::Migrate => Err("migrate needs a Postgres database".into()),
    }
}

async fn serve<DB: DatabaseAdapter>(queue: &ClinicQueue<DB>) -> Result<(), Box<dyn Error>> {
    let bind_addr = queue.config().bind_addr.clone();
    let app = queue.app_router();

    let listener = TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Starting clinic-queue server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
    }
}
